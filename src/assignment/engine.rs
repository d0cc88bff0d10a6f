use tracing::debug;

use super::error::{AssignmentError, AssignmentResult};
use super::matrix::ScoreMatrix;
use crate::constants::{DEFAULT_SCORE_THRESHOLD, is_valid_passage_threshold};

#[derive(Debug, Clone, Copy, PartialEq)]
/// One (query, chunk) pair eligible for assignment.
pub struct Candidate {
    pub query_index: usize,
    pub chunk_index: usize,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Query index → chunk column, or `None` for a gap. No column appears twice.
pub struct Assignment {
    by_query: Vec<Option<usize>>,
}

impl Assignment {
    /// Chunk column claimed by `query`, if any.
    pub fn chunk_for(&self, query: usize) -> Option<usize> {
        self.by_query.get(query).copied().flatten()
    }

    /// Query that claimed `chunk`, if any.
    pub fn query_for(&self, chunk: usize) -> Option<usize> {
        self.by_query.iter().position(|c| *c == Some(chunk))
    }

    pub fn is_gap(&self, query: usize) -> bool {
        self.chunk_for(query).is_none()
    }

    /// Indices of unassigned queries, ascending.
    pub fn gaps(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_query
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_none())
            .map(|(q, _)| q)
    }

    /// `(query, chunk)` pairs, ascending by query.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.by_query
            .iter()
            .enumerate()
            .filter_map(|(q, c)| c.map(|c| (q, c)))
    }

    pub fn assigned_count(&self) -> usize {
        self.by_query.iter().filter(|c| c.is_some()).count()
    }

    pub fn query_count(&self) -> usize {
        self.by_query.len()
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.by_query
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssignmentEngine {
    threshold: f64,
}

impl Default for AssignmentEngine {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SCORE_THRESHOLD,
        }
    }
}

impl AssignmentEngine {
    /// Creates an engine with a candidate cutoff on the passage scale.
    pub fn new(threshold: f64) -> AssignmentResult<Self> {
        if !is_valid_passage_threshold(threshold) {
            return Err(AssignmentError::InvalidThreshold { threshold });
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Candidates at or above the threshold, sorted best first.
    ///
    /// The sort is stable, so equal scores stay in enumeration order: lowest query index
    /// first, then lowest chunk index.
    pub fn candidates(&self, matrix: &ScoreMatrix) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = matrix
            .iter()
            .filter(|(_, _, score)| *score >= self.threshold)
            .map(|(query_index, chunk_index, score)| Candidate {
                query_index,
                chunk_index,
                score,
            })
            .collect();

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        candidates
    }

    /// Assigns each query at most one chunk and each chunk at most one query.
    pub fn assign(&self, matrix: &ScoreMatrix) -> AssignmentResult<Assignment> {
        if matrix.query_count() == 0 {
            return Err(AssignmentError::EmptyQueries);
        }

        let candidates = self.candidates(matrix);

        let mut by_query = vec![None; matrix.query_count()];
        let mut chunk_claimed = vec![false; matrix.chunk_count()];

        for candidate in &candidates {
            if by_query[candidate.query_index].is_some() || chunk_claimed[candidate.chunk_index] {
                continue;
            }
            by_query[candidate.query_index] = Some(candidate.chunk_index);
            chunk_claimed[candidate.chunk_index] = true;
        }

        let assignment = Assignment { by_query };

        debug!(
            queries = matrix.query_count(),
            chunks = matrix.chunk_count(),
            candidates = candidates.len(),
            assigned = assignment.assigned_count(),
            threshold = self.threshold,
            "Greedy assignment complete"
        );

        Ok(assignment)
    }
}
