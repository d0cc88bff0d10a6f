//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `COVERAGE_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::time::Duration;

use crate::constants::{
    DEFAULT_BATCH_DELAY_MS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_SCORE_THRESHOLD,
    is_valid_passage_threshold,
};

/// Runtime configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `COVERAGE_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Streaming analysis endpoint. Default: [`DEFAULT_BACKEND_URL`].
    pub backend_url: String,

    /// Passage score a query must reach to count as covered. Default: `45`.
    pub score_threshold: f64,

    /// Connect timeout and longest silence between reads of a streaming run.
    /// Default: 300 s.
    pub request_timeout: Duration,

    /// Pause between units of a batch optimization. Default: 2 s.
    pub batch_delay: Duration,
}

/// Backend URL used when `COVERAGE_BACKEND_URL` is not set.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/api/analyze/stream";

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            score_threshold: DEFAULT_SCORE_THRESHOLD,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            batch_delay: Duration::from_millis(DEFAULT_BATCH_DELAY_MS),
        }
    }
}

impl Config {
    const ENV_BACKEND_URL: &'static str = "COVERAGE_BACKEND_URL";
    const ENV_SCORE_THRESHOLD: &'static str = "COVERAGE_SCORE_THRESHOLD";
    const ENV_REQUEST_TIMEOUT_SECS: &'static str = "COVERAGE_REQUEST_TIMEOUT_SECS";
    const ENV_BATCH_DELAY_MS: &'static str = "COVERAGE_BATCH_DELAY_MS";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let backend_url = Self::parse_string_from_env(Self::ENV_BACKEND_URL, defaults.backend_url);
        let score_threshold = Self::parse_threshold_from_env(defaults.score_threshold)?;
        let request_timeout = Self::parse_u64_from_env(Self::ENV_REQUEST_TIMEOUT_SECS)?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);
        let batch_delay = Self::parse_u64_from_env(Self::ENV_BATCH_DELAY_MS)?
            .map(Duration::from_millis)
            .unwrap_or(defaults.batch_delay);

        let config = Self {
            backend_url,
            score_threshold,
            request_timeout,
            batch_delay,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants that parsing alone cannot enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.backend_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(ConfigError::InvalidBackendUrl {
                value: self.backend_url.clone(),
            });
        }

        if !is_valid_passage_threshold(self.score_threshold) {
            return Err(ConfigError::InvalidThreshold {
                value: self.score_threshold,
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(())
    }

    fn parse_threshold_from_env(default: f64) -> Result<f64, ConfigError> {
        match env::var(Self::ENV_SCORE_THRESHOLD) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::ThresholdParseError { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }

    fn parse_u64_from_env(var_name: &'static str) -> Result<Option<u64>, ConfigError> {
        match env::var(var_name) {
            Ok(value) => value
                .trim()
                .parse()
                .map(Some)
                .map_err(|e| ConfigError::IntegerParseError {
                    name: var_name,
                    value,
                    source: e,
                }),
            Err(_) => Ok(None),
        }
    }
}
