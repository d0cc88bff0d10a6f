//! Cross-cutting, shared constants.
//!
//! Scores on the passage scale run from `0` to `100`; raw cosine runs from `-1` to `1`.
//! Keep the two scales apart: thresholds in this module say which one they belong to.

/// Minimum passage score for a query to count as covered (inclusive).
pub const GOOD_MATCH_THRESHOLD: f64 = 45.0;

/// Default candidate cutoff used by the assignment engine (passage scale).
pub const DEFAULT_SCORE_THRESHOLD: f64 = GOOD_MATCH_THRESHOLD;

/// Upper bound of the passage scale.
pub const MAX_PASSAGE_SCORE: f64 = 100.0;

/// Maximum number of characters kept in a chunk preview (before the ellipsis).
pub const PREVIEW_MAX_CHARS: usize = 100;

/// Suffix appended to truncated previews.
pub const PREVIEW_ELLIPSIS: &str = "...";

/// Query terms must be longer than this many characters to take part in placement.
pub const MIN_PLACEMENT_TERM_CHARS: usize = 3;

/// Heading suggested for a gap when the document has no headings at all.
pub const FALLBACK_HEADING: &str = "Introduction";

/// Separator used when a heading path is rendered as a single string.
pub const HEADING_PATH_SEPARATOR: &str = " > ";

/// Number of ordered stages in the streaming analysis pipeline.
pub const PIPELINE_STAGE_COUNT: usize = 5;

/// Default delay between two units of a batch optimization run.
pub const DEFAULT_BATCH_DELAY_MS: u64 = 2_000;

/// Default upper bound for one streaming analysis request.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;

/// Returns `true` if `threshold` is a usable cutoff on the passage scale.
pub fn is_valid_passage_threshold(threshold: f64) -> bool {
    threshold.is_finite() && (0.0..=MAX_PASSAGE_SCORE).contains(&threshold)
}
