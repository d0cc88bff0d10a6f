use serde::{Deserialize, Serialize};

use super::error::SimilarityResult;
use super::metrics::{
    cosine_unchecked, dot_unchecked, ensure_same_len, euclidean_unchecked, manhattan_unchecked,
    passage_score,
};
use crate::tier::{Metric, ScoreTier};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// All similarity measures for one (query, chunk) pair.
pub struct SimilarityScores {
    /// Raw cosine similarity in `[-1, 1]`.
    pub cosine: f64,
    /// Euclidean distance (no absolute scale).
    pub euclidean: f64,
    /// Manhattan distance (no absolute scale).
    pub manhattan: f64,
    /// Dot product (no absolute scale).
    pub dot_product: f64,
    /// Retrieval-probability proxy on the `0..=100` scale.
    pub passage_score: u8,
}

impl SimilarityScores {
    /// Computes every measure for `query` against `chunk`.
    pub fn compute(query: &[f32], chunk: &[f32]) -> SimilarityResult<Self> {
        ensure_same_len("similarity_scores", query, chunk)?;

        let cosine = cosine_unchecked(query, chunk);
        Ok(Self {
            cosine,
            euclidean: euclidean_unchecked(query, chunk),
            manhattan: manhattan_unchecked(query, chunk),
            dot_product: dot_unchecked(query, chunk),
            passage_score: passage_score(cosine),
        })
    }

    /// Builds a record from a cosine value alone (distances unknown, reported as `0`).
    pub fn from_cosine(cosine: f64) -> Self {
        Self {
            cosine,
            euclidean: 0.0,
            manhattan: 0.0,
            dot_product: 0.0,
            passage_score: passage_score(cosine),
        }
    }

    /// Tier of the passage score.
    pub fn passage_tier(&self) -> ScoreTier {
        ScoreTier::from_passage_score(f64::from(self.passage_score))
    }

    /// Returns the value recorded for `metric`.
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Cosine => self.cosine,
            Metric::PassageScore => f64::from(self.passage_score),
            Metric::Euclidean => self.euclidean,
            Metric::Manhattan => self.manhattan,
            Metric::DotProduct => self.dot_product,
        }
    }
}
