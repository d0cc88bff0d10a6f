use serde::{Deserialize, Serialize};

use super::stage::{Stage, StageId, StagePhase};
use crate::chunk::{ChunkScore, KeywordScore};

/// Sentinel some producers send after the last event.
pub const DONE_SENTINEL: &str = "[DONE]";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
/// One event of the streaming analysis protocol.
///
/// The `type` field is the discriminant; stage boundaries carry an explicit `phase`.
pub enum PipelineEvent {
    /// Initial stage snapshot; replaces the stage list wholesale.
    Started { stages: Vec<Stage> },
    EmbeddingInfo(EmbeddingInfo),
    EmbeddingBatch(EmbeddingBatch),
    Stage {
        stage: StageId,
        phase: StagePhase,
        #[serde(default, rename = "totalItems")]
        total_items: Option<usize>,
    },
    DocumentAggregate(DocumentAggregate),
    ChunkScored(ChunkScored),
    CoverageCalculated(CoverageCalculated),
    DiagnosticProgress(DiagnosticProgress),
    Complete(CompletePayload),
    Error { message: String },
}

impl PipelineEvent {
    /// Parses the data field of one frame. `Ok(None)` for the done sentinel.
    pub fn parse(data: &str) -> Result<Option<Self>, serde_json::Error> {
        let data = data.trim();
        if data == DONE_SENTINEL {
            return Ok(None);
        }
        serde_json::from_str(data).map(Some)
    }

    /// Tag name, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineEvent::Started { .. } => "started",
            PipelineEvent::EmbeddingInfo(_) => "embedding_info",
            PipelineEvent::EmbeddingBatch(_) => "embedding_batch",
            PipelineEvent::Stage { .. } => "stage",
            PipelineEvent::DocumentAggregate(_) => "document_aggregate",
            PipelineEvent::ChunkScored(_) => "chunk_scored",
            PipelineEvent::CoverageCalculated(_) => "coverage_calculated",
            PipelineEvent::DiagnosticProgress(_) => "diagnostic_progress",
            PipelineEvent::Complete(_) => "complete",
            PipelineEvent::Error { .. } => "error",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineEvent::Complete(_) | PipelineEvent::Error { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbeddingInfo {
    pub model: String,
    pub dimensions: usize,
    pub total_texts: usize,
    pub batch_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbeddingBatch {
    /// 1-based batch number.
    pub batch: usize,
    pub total_batches: usize,
    pub texts_embedded: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Similarity of the whole document to the query set.
pub struct DocumentAggregate {
    pub score: f64,
    #[serde(default)]
    pub interpretation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkScored {
    pub chunk_index: usize,
    #[serde(default)]
    pub best_query: Option<String>,
    #[serde(default)]
    pub best_score: f64,
    #[serde(default)]
    pub per_query_scores: Vec<KeywordScore>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverageStats {
    pub total_queries: usize,
    pub covered: usize,
    pub gaps: usize,
    pub coverage_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Producer's view of one query's best chunk.
pub struct CoverageMapEntry {
    pub query: String,
    #[serde(default)]
    pub chunk_index: Option<usize>,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub covered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageCalculated {
    #[serde(default)]
    pub summary: CoverageStats,
    #[serde(default)]
    pub map: Vec<CoverageMapEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DiagnosticProgress {
    pub pairs_processed: usize,
    pub total_pairs: usize,
}

impl DiagnosticProgress {
    /// Completed share in `0..=1`; `0` when the total is unknown.
    pub fn fraction(&self) -> f64 {
        if self.total_pairs == 0 {
            0.0
        } else {
            (self.pairs_processed as f64 / self.total_pairs as f64).min(1.0)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Diagnostic score for one (query, chunk) pair.
pub struct Diagnostic {
    pub query: String,
    pub chunk_index: usize,
    #[serde(default)]
    pub score: f64,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisSummary {
    pub total_chunks: usize,
    pub total_queries: usize,
    pub covered_queries: usize,
    pub gap_queries: usize,
    pub average_best_score: f64,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletePayload {
    #[serde(default)]
    pub summary: AnalysisSummary,
    #[serde(default)]
    pub chunk_scores: Vec<ChunkScore>,
    #[serde(default)]
    pub coverage_map: Vec<CoverageMapEntry>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}
