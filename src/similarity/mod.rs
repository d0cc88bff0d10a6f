//! Vector similarity primitives.
//!
//! All functions are pure and return [`SimilarityError::LengthMismatch`] when the two
//! vectors differ in length. A zero-magnitude vector is not an error: cosine falls back
//! to `0.0`.

pub mod error;
pub mod metrics;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::{SimilarityError, SimilarityResult};
pub use metrics::{
    cosine_similarity, dot_product, euclidean_distance, manhattan_distance, passage_score,
};
pub use types::SimilarityScores;
