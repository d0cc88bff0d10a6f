use std::collections::HashMap;

use super::error::{AssignmentError, AssignmentResult};
use crate::chunk::{ChunkScore, normalize_keyword};

/// Dense `queries × chunks` grid of optional passage scores.
///
/// `None` means no score was recorded for that pair; such pairs never become candidates.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    queries: usize,
    chunks: usize,
    cells: Vec<Option<f64>>,
}

impl ScoreMatrix {
    /// Creates a matrix with no recorded scores.
    pub fn new(queries: usize, chunks: usize) -> Self {
        Self {
            queries,
            chunks,
            cells: vec![None; queries * chunks],
        }
    }

    /// Builds a matrix from query-major rows. Rows must all have the same length.
    pub fn from_rows(rows: Vec<Vec<Option<f64>>>) -> AssignmentResult<Self> {
        let queries = rows.len();
        let chunks = rows.first().map_or(0, Vec::len);

        if let Some(row) = rows.iter().find(|row| row.len() != chunks) {
            return Err(AssignmentError::ShapeMismatch {
                expected: chunks,
                actual: row.len(),
            });
        }

        let cells: Vec<Option<f64>> = rows.into_iter().flatten().collect();

        Ok(Self {
            queries,
            chunks,
            cells,
        })
    }

    /// Builds a matrix of passage scores from streamed or locally computed chunk scores.
    ///
    /// Keywords are matched to `queries` after case normalization. Queries that normalize
    /// to the same keyword share its first score in a chunk; a repeated keyword overrides
    /// the row of the query at the same position among those duplicates. Column `c`
    /// describes `chunk_scores[c]`, which is not necessarily the chunk with index `c`.
    pub fn from_chunk_scores(queries: &[String], chunk_scores: &[ChunkScore]) -> Self {
        let mut lookup: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, query) in queries.iter().enumerate() {
            lookup.entry(normalize_keyword(query)).or_default().push(i);
        }

        let mut matrix = Self::new(queries.len(), chunk_scores.len());
        for (chunk, score) in chunk_scores.iter().enumerate() {
            let mut seen: HashMap<&str, usize> = HashMap::new();
            for keyword in &score.keyword_scores {
                let Some(rows) = lookup.get(&keyword.keyword) else {
                    continue;
                };
                let value = f64::from(keyword.scores.passage_score);
                let occurrence = seen.entry(keyword.keyword.as_str()).or_insert(0);

                match *occurrence {
                    0 => rows.iter().for_each(|&query| matrix.set(query, chunk, value)),
                    n => {
                        if let Some(&query) = rows.get(n) {
                            matrix.set(query, chunk, value);
                        }
                    }
                }
                *occurrence += 1;
            }
        }
        matrix
    }

    pub fn query_count(&self) -> usize {
        self.queries
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks
    }

    /// Records `score` for the pair. Out-of-range indices are ignored.
    pub fn set(&mut self, query: usize, chunk: usize, score: f64) {
        if query < self.queries && chunk < self.chunks {
            self.cells[query * self.chunks + chunk] = Some(score);
        }
    }

    pub fn get(&self, query: usize, chunk: usize) -> Option<f64> {
        if query < self.queries && chunk < self.chunks {
            self.cells[query * self.chunks + chunk]
        } else {
            None
        }
    }

    /// Best recorded score for `query` and the first chunk reaching it.
    pub fn best_for_query(&self, query: usize) -> Option<(usize, f64)> {
        (0..self.chunks)
            .filter_map(|chunk| self.get(query, chunk).map(|score| (chunk, score)))
            .filter(|(_, score)| !score.is_nan())
            .fold(None, |best, (chunk, score)| match best {
                Some((_, b)) if b >= score => best,
                _ => Some((chunk, score)),
            })
    }

    /// Iterates `(query, chunk, score)` for every recorded pair in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|score| (i / self.chunks, i % self.chunks, score))
        })
    }
}
