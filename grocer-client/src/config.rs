//! Client configuration.

use serde::{Deserialize, Serialize};
use url::Url;

use grocer_core::constants::{DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use grocer_core::error::{GrocerError, Result};

/// Analytics client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the analytics service (e.g. "http://localhost:8000")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// Whether cache-eligible queries go through the query cache
    pub enable_cache: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.into(),
            timeout_seconds: DEFAULT_REQUEST_TIMEOUT_SECS,
            enable_cache: true,
        }
    }
}

impl ClientConfig {
    /// Creates a config pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Reads the config from the environment (and a `.env` file if present).
    ///
    /// - `GROCER_API_URL`: service base URL
    /// - `GROCER_TIMEOUT_SECS`: request timeout
    /// - `GROCER_ENABLE_CACHE`: `false` or `0` disables the query cache
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        Self {
            base_url: std::env::var("GROCER_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.into()),
            timeout_seconds: std::env::var("GROCER_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            enable_cache: std::env::var("GROCER_ENABLE_CACHE")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(true),
        }
    }

    /// Overrides the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Disables caching.
    pub fn no_cache(mut self) -> Self {
        self.enable_cache = false;
        self
    }

    /// Parses and checks the base URL.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(self.base_url.trim())
            .map_err(|e| GrocerError::ConfigError(format!("invalid base URL '{}': {}", self.base_url, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(GrocerError::ConfigError(format!(
                "unsupported URL scheme: {}",
                url.scheme()
            )));
        }
        Ok(url)
    }

    /// Checks the config for values the client cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.parsed_base_url()?;
        if self.timeout_seconds == 0 {
            return Err(GrocerError::ConfigError("timeout must be at least 1 second".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout_seconds, 60);
        assert!(config.enable_cache);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::new("http://analytics.local:8000")
            .with_timeout(5)
            .no_cache();

        assert_eq!(config.base_url, "http://analytics.local:8000");
        assert_eq!(config.timeout_seconds, 5);
        assert!(!config.enable_cache);
    }

    #[test]
    fn test_config_rejects_bad_url() {
        assert!(matches!(
            ClientConfig::new("not a url").validate(),
            Err(GrocerError::ConfigError(_))
        ));
        assert!(ClientConfig::new("ftp://host").validate().is_err());
    }

    #[test]
    fn test_config_rejects_zero_timeout() {
        assert!(ClientConfig::default().with_timeout(0).validate().is_err());
    }
}
