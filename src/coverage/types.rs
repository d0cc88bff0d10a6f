use serde::{Deserialize, Serialize};

use super::error::{CoverageError, CoverageResult};
use crate::assignment::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemStatus {
    Ready,
    InProgress,
    Optimized,
    Gap,
}

impl WorkItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkItemStatus::Ready => "ready",
            WorkItemStatus::InProgress => "in_progress",
            WorkItemStatus::Optimized => "optimized",
            WorkItemStatus::Gap => "gap",
        }
    }
}

impl std::fmt::Display for WorkItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// The chunk a ready query is best served by.
pub struct AssignedChunk {
    pub index: usize,
    pub heading: String,
    pub preview: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    /// A heading shares at least one term with the query.
    Matched,
    /// Nothing matched; the suggestion falls back to the last heading.
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Where new content for a gap query should go.
pub struct PlacementSuggestion {
    pub heading: String,
    pub kind: PlacementKind,
    pub matched_terms: Vec<String>,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A query tracked through coverage analysis and optimization.
///
/// Items are never removed; only their status and scores change.
pub struct CoverageWorkItem {
    pub id: String,
    pub query: Query,
    pub status: WorkItemStatus,
    pub assigned_chunk: Option<AssignedChunk>,
    pub placement: Option<PlacementSuggestion>,
    pub original_score: Option<f64>,
    pub current_score: Option<f64>,
    /// Milliseconds since the Unix epoch of the last status change.
    pub updated_at: i64,
    #[serde(skip)]
    previous_status: Option<WorkItemStatus>,
}

impl CoverageWorkItem {
    pub fn new(query: Query, status: WorkItemStatus, best_score: Option<f64>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            query,
            status,
            assigned_chunk: None,
            placement: None,
            original_score: best_score,
            current_score: best_score,
            updated_at: chrono::Utc::now().timestamp_millis(),
            previous_status: None,
        }
    }

    pub fn with_assigned_chunk(mut self, chunk: AssignedChunk) -> Self {
        self.assigned_chunk = Some(chunk);
        self
    }

    pub fn with_placement(mut self, placement: PlacementSuggestion) -> Self {
        self.placement = Some(placement);
        self
    }

    pub fn is_gap(&self) -> bool {
        self.status == WorkItemStatus::Gap
    }

    /// Score gained since the item was created, if both scores are known.
    pub fn improvement(&self) -> Option<f64> {
        Some(self.current_score? - self.original_score?)
    }

    /// Marks the item as being optimized.
    pub fn begin_optimization(&mut self) -> CoverageResult<()> {
        match self.status {
            WorkItemStatus::Ready | WorkItemStatus::Gap | WorkItemStatus::Optimized => {
                self.previous_status = Some(self.status);
                self.set_status(WorkItemStatus::InProgress);
                Ok(())
            }
            WorkItemStatus::InProgress => Err(self.invalid(WorkItemStatus::InProgress)),
        }
    }

    /// Records the outcome of an optimization step.
    pub fn complete_optimization(
        &mut self,
        new_score: f64,
        chunk: Option<AssignedChunk>,
    ) -> CoverageResult<()> {
        if self.status != WorkItemStatus::InProgress {
            return Err(self.invalid(WorkItemStatus::Optimized));
        }
        self.current_score = Some(new_score);
        if chunk.is_some() {
            self.assigned_chunk = chunk;
        }
        self.previous_status = None;
        self.set_status(WorkItemStatus::Optimized);
        Ok(())
    }

    /// Returns an in-progress item to the status it had before optimization began.
    pub fn abandon_optimization(&mut self) -> CoverageResult<()> {
        match (self.status, self.previous_status.take()) {
            (WorkItemStatus::InProgress, Some(previous)) => {
                self.set_status(previous);
                Ok(())
            }
            (status, _) => Err(CoverageError::InvalidTransition {
                from: status,
                to: WorkItemStatus::Ready,
            }),
        }
    }

    fn set_status(&mut self, status: WorkItemStatus) {
        self.status = status;
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }

    fn invalid(&self, to: WorkItemStatus) -> CoverageError {
        CoverageError::InvalidTransition {
            from: self.status,
            to,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageSummary {
    pub total_queries: usize,
    pub ready: usize,
    pub in_progress: usize,
    pub optimized: usize,
    pub gaps: usize,
    /// Share of queries that are not gaps, `0..=100`.
    pub coverage_percent: f64,
}

impl CoverageSummary {
    pub fn from_items(items: &[CoverageWorkItem]) -> Self {
        let count = |status| items.iter().filter(|i| i.status == status).count();
        let total = items.len();
        let gaps = count(WorkItemStatus::Gap);

        Self {
            total_queries: total,
            ready: count(WorkItemStatus::Ready),
            in_progress: count(WorkItemStatus::InProgress),
            optimized: count(WorkItemStatus::Optimized),
            gaps,
            coverage_percent: if total == 0 {
                0.0
            } else {
                ((total - gaps) as f64 / total as f64 * 1000.0).round() / 10.0
            },
        }
    }
}
