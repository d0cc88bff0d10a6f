use tracing::debug;

use super::error::{CoverageError, CoverageResult};
use super::placement::suggest_placement;
use super::types::{AssignedChunk, CoverageWorkItem, WorkItemStatus};
use crate::assignment::{Assignment, Query, ScoreMatrix};
use crate::chunk::Chunk;
use crate::constants::{GOOD_MATCH_THRESHOLD, PREVIEW_ELLIPSIS, PREVIEW_MAX_CHARS};

/// `Ready` at or above [`GOOD_MATCH_THRESHOLD`], `Gap` below it.
pub fn classify(best_score: f64) -> WorkItemStatus {
    if best_score >= GOOD_MATCH_THRESHOLD {
        WorkItemStatus::Ready
    } else {
        WorkItemStatus::Gap
    }
}

/// Truncates `text` to at most `max_chars` characters, cutting at whitespace when
/// possible and terminating the result with `...`.
pub fn preview(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let cut: String = text.chars().take(max_chars).collect();
    let next_is_space = text
        .chars()
        .nth(max_chars)
        .is_some_and(char::is_whitespace);

    let kept = if next_is_space {
        cut.as_str()
    } else {
        match cut.rfind(char::is_whitespace) {
            Some(i) if i > 0 => &cut[..i],
            _ => cut.as_str(),
        }
    };

    format!("{}{}", kept.trim_end(), PREVIEW_ELLIPSIS)
}

/// Innermost heading of every chunk, deduplicated, in document order.
pub fn document_headings(chunks: &[Chunk]) -> Vec<String> {
    let mut ordered: Vec<&Chunk> = chunks.iter().collect();
    ordered.sort_by_key(|c| c.index);

    let mut headings: Vec<String> = Vec::new();
    for heading in ordered.into_iter().filter_map(Chunk::leaf_heading) {
        if !headings.iter().any(|h| h == heading) {
            headings.push(heading.to_string());
        }
    }
    headings
}

/// Turns queries, their scores and the greedy assignment into coverage work items.
///
/// `chunks[c]` must describe column `c` of `matrix`. A ready query points at the chunk the
/// assignment gave it; if the assignment handed its best chunk to another query, it points
/// at its best-scoring chunk instead.
pub fn build_work_items(
    queries: &[Query],
    chunks: &[Chunk],
    matrix: &ScoreMatrix,
    assignment: &Assignment,
) -> CoverageResult<Vec<CoverageWorkItem>> {
    if queries.len() != matrix.query_count() {
        return Err(CoverageError::ShapeMismatch {
            what: "query",
            expected: matrix.query_count(),
            actual: queries.len(),
        });
    }
    if chunks.len() != matrix.chunk_count() {
        return Err(CoverageError::ShapeMismatch {
            what: "chunk",
            expected: matrix.chunk_count(),
            actual: chunks.len(),
        });
    }

    let headings = document_headings(chunks);

    let items: Vec<CoverageWorkItem> = queries
        .iter()
        .enumerate()
        .map(|(q, query)| {
            let best = matrix.best_for_query(q);
            let best_score = best.map(|(_, score)| score);
            let status = classify(best_score.unwrap_or(0.0));

            let item = CoverageWorkItem::new(query.clone(), status, best_score);
            match status {
                WorkItemStatus::Ready => {
                    let column = assignment
                        .chunk_for(q)
                        .or(best.map(|(column, _)| column));
                    match column.and_then(|c| chunks.get(c)) {
                        Some(chunk) => item.with_assigned_chunk(AssignedChunk {
                            index: chunk.index,
                            heading: chunk.heading(),
                            preview: preview(&chunk.text, PREVIEW_MAX_CHARS),
                        }),
                        None => item,
                    }
                }
                _ => item.with_placement(suggest_placement(&query.text, &headings)),
            }
        })
        .collect();

    debug!(
        queries = items.len(),
        gaps = items.iter().filter(|i| i.is_gap()).count(),
        "Coverage classification complete"
    );

    Ok(items)
}
