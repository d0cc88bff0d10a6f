use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
/// Ordered pipeline stages. Serialized as their 1-based number.
pub enum StageId {
    EmbeddingGeneration = 1,
    DocumentAggregateScore = 2,
    ChunkScoring = 3,
    CoverageMapping = 4,
    DiagnosticScoring = 5,
}

impl StageId {
    pub const ALL: [StageId; 5] = [
        StageId::EmbeddingGeneration,
        StageId::DocumentAggregateScore,
        StageId::ChunkScoring,
        StageId::CoverageMapping,
        StageId::DiagnosticScoring,
    ];

    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Human-readable stage name.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::EmbeddingGeneration => "Embedding generation",
            StageId::DocumentAggregateScore => "Document aggregate score",
            StageId::ChunkScoring => "Chunk scoring",
            StageId::CoverageMapping => "Coverage mapping",
            StageId::DiagnosticScoring => "Diagnostic scoring",
        }
    }
}

impl TryFrom<u8> for StageId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        StageId::ALL
            .into_iter()
            .find(|s| s.number() == value)
            .ok_or_else(|| format!("unknown pipeline stage {value}"))
    }
}

impl From<StageId> for u8 {
    fn from(stage: StageId) -> Self {
        stage.number()
    }
}

impl std::fmt::Display for StageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name(), self.number())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
/// Stage progress. Ordered so that a status can only ever be raised.
pub enum StageStatus {
    #[default]
    Pending,
    Running,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Which edge of a stage a boundary event reports.
pub enum StagePhase {
    Started,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: StageId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: StageStatus,
    /// Item count reported when the stage completed, if any.
    #[serde(default)]
    pub total_items: Option<usize>,
}

impl Stage {
    pub fn pending(id: StageId) -> Self {
        Self {
            id,
            name: id.name().to_string(),
            status: StageStatus::Pending,
            total_items: None,
        }
    }

    /// Raises the status to `status`; never lowers it.
    pub fn advance(&mut self, status: StageStatus) {
        self.status = self.status.max(status);
    }

    pub fn is_complete(&self) -> bool {
        self.status == StageStatus::Complete
    }
}

/// The five stages, all pending.
pub fn initial_stages() -> Vec<Stage> {
    StageId::ALL.into_iter().map(Stage::pending).collect()
}
