use std::path::PathBuf;

use thiserror::Error;

use crate::assignment::AssignmentError;
use crate::coverage::CoverageError;
use crate::pipeline::PipelineError;
use crate::similarity::SimilarityError;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("failed to read analysis input {path}: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse analysis input {path}: {source}")]
    ParseInput {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("expected {expected} {what} embeddings, got {actual}")]
    EmbeddingCount {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{intents} intent labels given for {queries} queries")]
    IntentCount { intents: usize, queries: usize },

    #[error(transparent)]
    Similarity(#[from] SimilarityError),

    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    #[error(transparent)]
    Coverage(#[from] CoverageError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}
