//! Qualitative tiers for similarity scores.
//!
//! Two scales exist and must not be mixed: [`ScoreTier::from_passage_score`] reads the
//! `0..=100` passage scale, [`ScoreTier::from_cosine`] reads raw cosine in `[-1, 1]`.
//! Distance metrics and the dot product have no absolute scale and never get a tier.

use serde::{Deserialize, Serialize};


/// Passage-scale breakpoints, highest first.
pub const PASSAGE_TIER_BREAKPOINTS: [(f64, ScoreTier); 4] = [
    (90.0, ScoreTier::Excellent),
    (75.0, ScoreTier::Good),
    (60.0, ScoreTier::Moderate),
    (40.0, ScoreTier::Weak),
];

/// Cosine-scale breakpoints, highest first.
pub const COSINE_TIER_BREAKPOINTS: [(f64, ScoreTier); 4] = [
    (0.9, ScoreTier::Excellent),
    (0.7, ScoreTier::Good),
    (0.5, ScoreTier::Moderate),
    (0.3, ScoreTier::Weak),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreTier {
    Excellent,
    Good,
    Moderate,
    Weak,
    Poor,
}

impl ScoreTier {
    /// Tier for a score on the `0..=100` passage scale.
    pub fn from_passage_score(score: f64) -> Self {
        Self::from_breakpoints(score, &PASSAGE_TIER_BREAKPOINTS)
    }

    /// Tier for a raw cosine similarity.
    pub fn from_cosine(cosine: f64) -> Self {
        Self::from_breakpoints(cosine, &COSINE_TIER_BREAKPOINTS)
    }

    fn from_breakpoints(value: f64, breakpoints: &[(f64, ScoreTier)]) -> Self {
        breakpoints
            .iter()
            .find(|(min, _)| value >= *min)
            .map(|(_, tier)| *tier)
            .unwrap_or(ScoreTier::Poor)
    }

    /// Stable lower-case label.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "excellent",
            ScoreTier::Good => "good",
            ScoreTier::Moderate => "moderate",
            ScoreTier::Weak => "weak",
            ScoreTier::Poor => "poor",
        }
    }
}

impl std::fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A similarity measure recorded in [`SimilarityScores`](crate::similarity::SimilarityScores).
pub enum Metric {
    Cosine,
    PassageScore,
    Euclidean,
    Manhattan,
    DotProduct,
}

impl Metric {
    /// Returns the tier for `value` on this metric's scale, or `None` for unscaled metrics.
    pub fn tier(&self, value: f64) -> Option<ScoreTier> {
        match self {
            Metric::Cosine => Some(ScoreTier::from_cosine(value)),
            Metric::PassageScore => Some(ScoreTier::from_passage_score(value)),
            Metric::Euclidean | Metric::Manhattan | Metric::DotProduct => None,
        }
    }

    /// Returns `true` if the metric has an absolute scale.
    pub fn has_scale(&self) -> bool {
        matches!(self, Metric::Cosine | Metric::PassageScore)
    }
}
