//! Configuration error types.

use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Backend URL is not an http(s) URL.
    #[error("invalid backend url '{value}': must start with http:// or https://")]
    InvalidBackendUrl { value: String },

    /// Score threshold string could not be parsed as a number.
    #[error("failed to parse score threshold '{value}': {source}")]
    ThresholdParseError {
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// Score threshold is outside the passage score range.
    #[error("invalid score threshold {value}: must be between 0 and 100")]
    InvalidThreshold { value: f64 },

    /// An integer setting could not be parsed.
    #[error("failed to parse {name} '{value}': {source}")]
    IntegerParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,
}
