//! Streaming analysis pipeline.
//!
//! A scoring backend runs five ordered stages and streams typed events as
//! server-sent events. [`reduce`] folds events into a [`PipelineState`]; the
//! [`PipelineCoordinator`] owns the only mutable copy of that state, feeds it from the
//! byte stream and hands back the terminal [`AnalysisResult`].
//!
//! # Stage ordering
//!
//! Statuses only move forward (`pending → running → complete`). A boundary for stage `N`
//! completes everything below `N`; a late boundary for a stage that already completed
//! is ignored, so out-of-order boundaries can never reopen a stage.

pub mod coordinator;
pub mod error;
pub mod event;
pub mod request;
pub mod sse;
pub mod stage;
pub mod state;


pub use coordinator::PipelineCoordinator;
pub use error::{PipelineError, PipelineResult};
pub use event::{
    AnalysisSummary, ChunkScored, CompletePayload, CoverageCalculated, CoverageMapEntry,
    CoverageStats, DONE_SENTINEL, Diagnostic, DiagnosticProgress, DocumentAggregate,
    EmbeddingBatch, EmbeddingInfo, PipelineEvent,
};
pub use request::AnalysisRequest;
pub use sse::{SseDecoder, SseFrame};
pub use stage::{Stage, StageId, StagePhase, StageStatus, initial_stages};
pub use state::{AnalysisResult, PipelineState, RunStatus, reduce};
