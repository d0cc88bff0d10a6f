use serde::{Deserialize, Serialize};
use tracing::info;

use super::error::AnalysisError;
use crate::assignment::{AssignmentEngine, Query, ScoreMatrix};
use crate::chunk::{Chunk, ChunkScore};
use crate::coverage::{CoverageSummary, CoverageWorkItem, build_work_items};
use crate::pipeline::AnalysisResult;
use crate::tier::ScoreTier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One query the greedy assignment placed on a chunk.
pub struct AssignedPair {
    pub query_index: usize,
    pub query: String,
    pub chunk_index: usize,
    pub score: f64,
    pub tier: ScoreTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Everything the CLI reports about one analysed document.
pub struct CoverageReport {
    pub assignments: Vec<AssignedPair>,
    pub work_items: Vec<CoverageWorkItem>,
    pub summary: CoverageSummary,
    pub document_aggregate_score: Option<f64>,
    pub chunk_scores: Vec<ChunkScore>,
}

impl CoverageReport {
    /// Assigns queries to chunks and classifies every query.
    pub fn build(
        queries: &[Query],
        chunk_scores: Vec<ChunkScore>,
        document_aggregate_score: Option<f64>,
        engine: &AssignmentEngine,
    ) -> Result<Self, AnalysisError> {
        let texts: Vec<String> = queries.iter().map(|q| q.text.clone()).collect();
        let matrix = ScoreMatrix::from_chunk_scores(&texts, &chunk_scores);
        let assignment = engine.assign(&matrix)?;

        let chunks: Vec<Chunk> = chunk_scores.iter().map(ChunkScore::to_chunk).collect();
        let work_items = build_work_items(queries, &chunks, &matrix, &assignment)?;

        let assignments = assignment
            .pairs()
            .filter_map(|(q, c)| {
                let score = matrix.get(q, c)?;
                Some(AssignedPair {
                    query_index: q,
                    query: texts[q].clone(),
                    chunk_index: chunks[c].index,
                    score,
                    tier: ScoreTier::from_passage_score(score),
                })
            })
            .collect();

        let summary = CoverageSummary::from_items(&work_items);
        info!(
            queries = summary.total_queries,
            gaps = summary.gaps,
            coverage_percent = summary.coverage_percent,
            "Coverage report built"
        );

        Ok(Self {
            assignments,
            work_items,
            summary,
            document_aggregate_score,
            chunk_scores,
        })
    }

    /// Builds a report from the terminal result of a streaming run.
    pub fn from_result(
        queries: &[Query],
        result: AnalysisResult,
        engine: &AssignmentEngine,
    ) -> Result<Self, AnalysisError> {
        Self::build(
            queries,
            result.chunk_scores,
            result.document_aggregate_score,
            engine,
        )
    }

    pub fn gaps(&self) -> impl Iterator<Item = &CoverageWorkItem> {
        self.work_items.iter().filter(|item| item.is_gap())
    }
}
