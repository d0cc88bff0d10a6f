//! Flat rows for columnar export.
//!
//! Each row holds scalar fields only, with stable column names, so any CSV or
//! spreadsheet writer can consume it through `serde` or [`ChunkScoreRow::record`].


use serde::Serialize;

use crate::chunk::ChunkScore;
use crate::coverage::CoverageWorkItem;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One (chunk, query) score.
pub struct ChunkScoreRow {
    pub chunk_index: usize,
    pub chunk_id: String,
    pub heading: String,
    pub word_count: usize,
    pub query: String,
    pub cosine: f64,
    pub euclidean: f64,
    pub manhattan: f64,
    pub dot_product: f64,
    pub passage_score: u8,
    pub tier: &'static str,
}

impl ChunkScoreRow {
    pub const HEADERS: [&'static str; 11] = [
        "chunk_index",
        "chunk_id",
        "heading",
        "word_count",
        "query",
        "cosine",
        "euclidean",
        "manhattan",
        "dot_product",
        "passage_score",
        "tier",
    ];

    /// Field values in [`HEADERS`](Self::HEADERS) order.
    pub fn record(&self) -> Vec<String> {
        vec![
            self.chunk_index.to_string(),
            self.chunk_id.clone(),
            self.heading.clone(),
            self.word_count.to_string(),
            self.query.clone(),
            format!("{:.4}", self.cosine),
            format!("{:.4}", self.euclidean),
            format!("{:.4}", self.manhattan),
            format!("{:.4}", self.dot_product),
            self.passage_score.to_string(),
            self.tier.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One query's coverage state.
pub struct CoverageRow {
    pub query: String,
    pub intent_type: &'static str,
    pub status: &'static str,
    pub chunk_index: Option<usize>,
    pub heading: String,
    pub original_score: Option<f64>,
    pub current_score: Option<f64>,
    pub improvement: Option<f64>,
    pub placement_heading: String,
    pub rationale: String,
}

impl CoverageRow {
    pub const HEADERS: [&'static str; 10] = [
        "query",
        "intent_type",
        "status",
        "chunk_index",
        "heading",
        "original_score",
        "current_score",
        "improvement",
        "placement_heading",
        "rationale",
    ];

    /// Field values in [`HEADERS`](Self::HEADERS) order; missing values are empty.
    pub fn record(&self) -> Vec<String> {
        let opt = |v: Option<f64>| v.map(|v| format!("{v:.1}")).unwrap_or_default();
        vec![
            self.query.clone(),
            self.intent_type.to_string(),
            self.status.to_string(),
            self.chunk_index.map(|c| c.to_string()).unwrap_or_default(),
            self.heading.clone(),
            opt(self.original_score),
            opt(self.current_score),
            opt(self.improvement),
            self.placement_heading.clone(),
            self.rationale.clone(),
        ]
    }
}

/// One row per (chunk, query) pair, chunk-major.
pub fn chunk_score_rows(chunk_scores: &[ChunkScore]) -> Vec<ChunkScoreRow> {
    chunk_scores
        .iter()
        .flat_map(|chunk| {
            let heading = chunk.heading_path.join(crate::constants::HEADING_PATH_SEPARATOR);
            chunk.keyword_scores.iter().map(move |k| ChunkScoreRow {
                chunk_index: chunk.chunk_index,
                chunk_id: chunk.chunk_id.clone(),
                heading: heading.clone(),
                word_count: chunk.word_count,
                query: k.keyword.clone(),
                cosine: k.scores.cosine,
                euclidean: k.scores.euclidean,
                manhattan: k.scores.manhattan,
                dot_product: k.scores.dot_product,
                passage_score: k.scores.passage_score,
                tier: k.scores.passage_tier().as_str(),
            })
        })
        .collect()
}

/// One row per work item, in input order.
pub fn coverage_rows(items: &[CoverageWorkItem]) -> Vec<CoverageRow> {
    items
        .iter()
        .map(|item| {
            let (chunk_index, heading) = match &item.assigned_chunk {
                Some(chunk) => (Some(chunk.index), chunk.heading.clone()),
                None => (None, String::new()),
            };
            let (placement_heading, rationale) = match &item.placement {
                Some(p) => (p.heading.clone(), p.rationale.clone()),
                None => (String::new(), String::new()),
            };

            CoverageRow {
                query: item.query.text.clone(),
                intent_type: item.query.intent_type.as_str(),
                status: item.status.as_str(),
                chunk_index,
                heading,
                original_score: item.original_score,
                current_score: item.current_score,
                improvement: item.improvement(),
                placement_heading,
                rationale,
            }
        })
        .collect()
}
