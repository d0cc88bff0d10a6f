use thiserror::Error;

use super::types::WorkItemStatus;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverageError {
    #[error("invalid work item transition from {from} to {to}")]
    InvalidTransition {
        from: WorkItemStatus,
        to: WorkItemStatus,
    },

    #[error("{what} count mismatch: score matrix has {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

pub type CoverageResult<T> = Result<T, CoverageError>;
