use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::AnalysisError;
use crate::assignment::{IntentType, Query};
use crate::pipeline::AnalysisRequest;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Precomputed embedding vectors, aligned with the request's queries and chunks.
pub struct Embeddings {
    pub queries: Vec<Vec<f32>>,
    pub chunks: Vec<Vec<f32>>,
    /// Whole-document embedding, used for the aggregate score.
    #[serde(default)]
    pub document: Option<Vec<f32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Contents of an analysis input file.
pub struct AnalysisInput {
    #[serde(flatten)]
    pub request: AnalysisRequest,
    /// Raw intent labels, one per query. Missing labels mean primary intent.
    #[serde(default)]
    pub intents: Vec<String>,
    /// When present the input is scored locally instead of by the backend.
    #[serde(default)]
    pub embeddings: Option<Embeddings>,
}

impl AnalysisInput {
    pub fn new(request: AnalysisRequest) -> Self {
        Self {
            request,
            intents: Vec::new(),
            embeddings: None,
        }
    }

    pub fn with_embeddings(mut self, embeddings: Embeddings) -> Self {
        self.embeddings = Some(embeddings);
        self
    }

    pub fn from_path(path: &Path) -> Result<Self, AnalysisError> {
        let raw = std::fs::read_to_string(path).map_err(|e| AnalysisError::ReadInput {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&raw).map_err(|e| AnalysisError::ParseInput {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Request queries paired with their normalized intents.
    pub fn queries(&self) -> Result<Vec<Query>, AnalysisError> {
        let texts = &self.request.queries;
        if self.intents.len() > texts.len() {
            return Err(AnalysisError::IntentCount {
                intents: self.intents.len(),
                queries: texts.len(),
            });
        }

        Ok(texts
            .iter()
            .enumerate()
            .map(|(i, text)| match self.intents.get(i) {
                Some(raw) => Query::with_raw_intent(text.clone(), raw),
                None => Query::new(text.clone(), IntentType::Primary),
            })
            .collect())
    }
}
