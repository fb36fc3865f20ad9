//! Application settings.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};
use crate::api::DEFAULT_TIMEOUT_SECS;

/// Default catalog API base URL.
pub const DEFAULT_API_URL: &str = "https://api.artic.edu/api/v1";

/// Default event loop tick rate in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Application-wide settings.
///
/// Every field has a default, so a partial `config.toml` is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the catalog API.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Whether to capture mouse events.
    pub mouse: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            mouse: true,
        }
    }
}

impl Config {
    /// Validate the settings.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` describing the first
    /// invalid field.
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "api_url cannot be empty".to_string(),
            ));
        }

        if !self.api_url.starts_with("https://") && !self.api_url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "api_url '{}' must start with http:// or https://",
                self.api_url
            )));
        }

        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "request_timeout_secs must be greater than zero".to_string(),
            ));
        }

        if self.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
