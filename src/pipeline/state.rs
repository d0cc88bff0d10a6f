use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::event::{
    AnalysisSummary, ChunkScored, CompletePayload, CoverageCalculated, CoverageMapEntry,
    Diagnostic, DiagnosticProgress, DocumentAggregate, EmbeddingBatch, EmbeddingInfo,
    PipelineEvent,
};
use super::stage::{Stage, StageId, StagePhase, StageStatus, initial_stages};
use crate::chunk::ChunkScore;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Failed {
        message: String,
    },
}

impl RunStatus {
    /// `true` once a terminal event has been applied.
    pub fn is_finished(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Terminal result of a successful run.
pub struct AnalysisResult {
    pub chunk_scores: Vec<ChunkScore>,
    pub coverage_map: Vec<CoverageMapEntry>,
    pub diagnostics: Vec<Diagnostic>,
    pub summary: AnalysisSummary,
    pub document_aggregate_score: Option<f64>,
}

impl AnalysisResult {
    fn from_payload(payload: &CompletePayload, document_aggregate_score: Option<f64>) -> Self {
        Self {
            chunk_scores: payload.chunk_scores.clone(),
            coverage_map: payload.coverage_map.clone(),
            diagnostics: payload.diagnostics.clone(),
            summary: payload.summary.clone(),
            document_aggregate_score,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Everything accumulated during one analysis run.
pub struct PipelineState {
    pub run_id: Option<String>,
    pub status: RunStatus,
    pub stages: Vec<Stage>,
    pub embedding_info: Option<EmbeddingInfo>,
    pub embedding_batches: Vec<EmbeddingBatch>,
    pub document_aggregate: Option<DocumentAggregate>,
    /// Append-only within a run.
    pub scored_chunks: Vec<ChunkScored>,
    pub coverage: Option<CoverageCalculated>,
    pub diagnostic_progress: Option<DiagnosticProgress>,
    pub summary: Option<AnalysisSummary>,
    pub result: Option<AnalysisResult>,
    /// Frames that could not be parsed and were skipped.
    pub skipped_frames: usize,
}

impl Default for PipelineState {
    fn default() -> Self {
        Self {
            run_id: None,
            status: RunStatus::Idle,
            stages: initial_stages(),
            embedding_info: None,
            embedding_batches: Vec::new(),
            document_aggregate: None,
            scored_chunks: Vec::new(),
            coverage: None,
            diagnostic_progress: None,
            summary: None,
            result: None,
            skipped_frames: 0,
        }
    }
}

impl PipelineState {
    /// Fresh state for a run that is about to receive its first event.
    pub fn for_run(run_id: impl Into<String>) -> Self {
        Self {
            run_id: Some(run_id.into()),
            status: RunStatus::Running,
            ..Self::default()
        }
    }

    /// Frozen states ignore every further event.
    pub fn is_frozen(&self) -> bool {
        self.status.is_finished()
    }

    pub fn stage(&self, id: StageId) -> Option<&Stage> {
        self.stages.iter().find(|s| s.id == id)
    }

    pub fn stage_status(&self, id: StageId) -> Option<StageStatus> {
        self.stage(id).map(|s| s.status)
    }

    /// Stage currently running, if any.
    pub fn current_stage(&self) -> Option<StageId> {
        self.stages
            .iter()
            .find(|s| s.status == StageStatus::Running)
            .map(|s| s.id)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            RunStatus::Failed { message } => Some(message),
            _ => None,
        }
    }

    /// Texts embedded so far across all reported batches.
    pub fn texts_embedded(&self) -> usize {
        self.embedding_batches.iter().map(|b| b.texts_embedded).sum()
    }

    fn apply_boundary(&mut self, id: StageId, phase: StagePhase, total_items: Option<usize>) {
        let target = match phase {
            StagePhase::Started => StageStatus::Running,
            StagePhase::Completed => StageStatus::Complete,
        };

        for stage in &mut self.stages {
            if stage.id < id {
                stage.advance(StageStatus::Complete);
            } else if stage.id == id {
                stage.advance(target);
                if total_items.is_some() {
                    stage.total_items = total_items;
                }
            }
        }
    }

    fn merge_batch(&mut self, batch: EmbeddingBatch) {
        match self
            .embedding_batches
            .iter_mut()
            .find(|b| b.batch == batch.batch)
        {
            Some(existing) => *existing = batch,
            None => self.embedding_batches.push(batch),
        }
    }
}

/// Folds one event into the state.
///
/// Stage statuses only move forward. A boundary for stage `N` completes every stage
/// below `N` and raises `N` itself; stages above `N` are left alone. A boundary that
/// arrives after its stage already completed changes nothing.
pub fn reduce(mut state: PipelineState, event: &PipelineEvent) -> PipelineState {
    if state.is_frozen() {
        trace!(kind = event.kind(), "Ignoring event after terminal state");
        return state;
    }
    if state.status == RunStatus::Idle {
        state.status = RunStatus::Running;
    }

    match event {
        PipelineEvent::Started { stages } => {
            state.stages = stages.clone();
        }
        PipelineEvent::EmbeddingInfo(info) => {
            state.embedding_info = Some(info.clone());
        }
        PipelineEvent::EmbeddingBatch(batch) => {
            state.merge_batch(*batch);
        }
        PipelineEvent::Stage {
            stage,
            phase,
            total_items,
        } => {
            state.apply_boundary(*stage, *phase, *total_items);
        }
        PipelineEvent::DocumentAggregate(aggregate) => {
            state.document_aggregate = Some(aggregate.clone());
        }
        PipelineEvent::ChunkScored(scored) => {
            state.scored_chunks.push(scored.clone());
        }
        PipelineEvent::CoverageCalculated(coverage) => {
            state.coverage = Some(coverage.clone());
        }
        PipelineEvent::DiagnosticProgress(progress) => {
            state.diagnostic_progress = Some(*progress);
        }
        PipelineEvent::Complete(payload) => {
            for stage in &mut state.stages {
                stage.advance(StageStatus::Complete);
            }
            let aggregate = state.document_aggregate.as_ref().map(|d| d.score);
            state.summary = Some(payload.summary.clone());
            state.result = Some(AnalysisResult::from_payload(payload, aggregate));
            state.status = RunStatus::Completed;
        }
        PipelineEvent::Error { message } => {
            state.status = RunStatus::Failed {
                message: message.clone(),
            };
        }
    }

    debug!(
        kind = event.kind(),
        current_stage = ?state.current_stage(),
        scored_chunks = state.scored_chunks.len(),
        "Applied pipeline event"
    );

    state
}
