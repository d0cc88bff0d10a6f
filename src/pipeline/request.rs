use serde::{Deserialize, Serialize};

use super::error::{PipelineError, PipelineResult};
use crate::chunk::Chunk;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Input of one streaming analysis run.
pub struct AnalysisRequest {
    pub chunks: Vec<Chunk>,
    pub queries: Vec<String>,
    /// Full document text, used for the document-level aggregate score.
    #[serde(default)]
    pub document_text: String,
}

impl AnalysisRequest {
    pub fn new(
        chunks: Vec<Chunk>,
        queries: Vec<String>,
        document_text: impl Into<String>,
    ) -> Self {
        Self {
            chunks,
            queries,
            document_text: document_text.into(),
        }
    }

    /// Rejects a request without any non-blank query.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.queries.iter().all(|q| q.trim().is_empty()) {
            return Err(PipelineError::EmptyQueries);
        }
        Ok(())
    }
}
