//! Query coverage classification and work items.
//!
//! A query is `ready` when its best passage score reaches
//! [`GOOD_MATCH_THRESHOLD`](crate::constants::GOOD_MATCH_THRESHOLD), otherwise it is a
//! `gap`. Ready queries point at their chunk; gaps get a suggested placement derived from
//! lexical overlap between query terms and document headings.

pub mod classifier;
pub mod error;
pub mod placement;
pub mod types;

#[cfg(test)]
mod tests;

pub use classifier::{build_work_items, classify, document_headings, preview};
pub use error::{CoverageError, CoverageResult};
pub use placement::{query_terms, suggest_placement};
pub use types::{
    AssignedChunk, CoverageSummary, CoverageWorkItem, PlacementKind, PlacementSuggestion,
    WorkItemStatus,
};
