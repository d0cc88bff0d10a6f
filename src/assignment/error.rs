use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignmentError {
    #[error("assignment requires at least one query")]
    EmptyQueries,

    #[error("invalid score threshold {threshold}: must be within 0..=100")]
    InvalidThreshold { threshold: f64 },

    #[error("score matrix rows differ in length: expected {expected} columns, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

pub type AssignmentResult<T> = Result<T, AssignmentError>;
