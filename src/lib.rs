//! Query coverage engine.
//!
//! Measures how well a document's chunks answer a set of target queries.
//!
//! ## Scoring
//! - [`similarity`]: cosine, Euclidean, Manhattan and dot-product measures plus the
//!   `0..=100` passage score
//! - [`tier`]: qualitative bands for passage and cosine scores
//!
//! ## Coverage
//! - [`AssignmentEngine`]: greedy one-to-one query to chunk assignment
//! - [`build_work_items`]: ready/gap classification with previews and placement
//!   suggestions
//! - [`BatchOptimizer`]: sequential optimization of work items behind an [`Optimizer`]
//!
//! ## Streaming
//! - [`PipelineCoordinator`]: consumes the backend's staged SSE event stream
//! - [`reduce`]: the pure event fold behind it
//!
//! ## Putting it together
//! - [`Analyzer`] scores an [`AnalysisInput`] locally or through the backend and builds a
//!   [`CoverageReport`]
//! - [`export`] flattens reports into rows

pub mod analysis;
pub mod assignment;
pub mod batch;
pub mod chunk;
pub mod config;
pub mod constants;
pub mod coverage;
pub mod export;
pub mod pipeline;
pub mod similarity;
pub mod tier;

pub use analysis::{AnalysisError, AnalysisInput, Analyzer, CoverageReport, Embeddings};
pub use assignment::{
    Assignment, AssignmentEngine, AssignmentError, IntentType, Query, ScoreMatrix,
};
pub use batch::{BatchError, BatchOptimizer, BatchReport, CancelFlag, Optimization, Optimizer};
pub use chunk::{Chunk, ChunkScore, KeywordScore};
pub use config::{Config, ConfigError};
pub use constants::{DEFAULT_SCORE_THRESHOLD, GOOD_MATCH_THRESHOLD};
pub use coverage::{
    CoverageError, CoverageSummary, CoverageWorkItem, PlacementSuggestion, WorkItemStatus,
    build_work_items,
};
pub use export::{ChunkScoreRow, CoverageRow, chunk_score_rows, coverage_rows};
pub use pipeline::{
    AnalysisRequest, AnalysisResult, PipelineCoordinator, PipelineError, PipelineEvent,
    PipelineState, RunStatus, reduce,
};
pub use similarity::{SimilarityError, SimilarityScores, passage_score};
pub use tier::{Metric, ScoreTier};
