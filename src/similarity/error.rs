use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimilarityError {
    #[error("{operation}: vector length mismatch ({left} vs {right})")]
    LengthMismatch {
        operation: &'static str,
        left: usize,
        right: usize,
    },
}

pub type SimilarityResult<T> = Result<T, SimilarityError>;
