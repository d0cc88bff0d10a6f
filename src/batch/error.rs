use thiserror::Error;

use crate::coverage::CoverageError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BatchError {
    #[error("a batch optimization is already running")]
    AlreadyRunning,

    /// The optimizer failed for one unit. Other units still run.
    #[error("optimizer failed: {0}")]
    Optimizer(String),

    #[error(transparent)]
    Coverage(#[from] CoverageError),
}

pub type BatchResult<T> = Result<T, BatchError>;
