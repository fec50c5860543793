//! # Client Configuration
//!
//! Configuration loaded from environment variables and validated on startup so a
//! misconfigured client fails fast.
//!
//! | Variable                          | Default                       |
//! |-----------------------------------|-------------------------------|
//! | `COMPASS_API_BASE_URL`            | `http://127.0.0.1:5001/api`   |
//! | `COMPASS_CACHE_DIR`               | `.compass-cache`              |
//! | `COMPASS_REQUEST_TIMEOUT_SECS`    | `15` (1..=120)                |
//! | `COMPASS_REMINDER_INTERVAL_SECS`  | `60` (>= 1)                   |
//! | `COMPASS_LOG_DIR`, `RUST_LOG`     | see [`LogConfig`]             |
//!
//! The config is passed explicitly to [`crate::app::App`]; there is no global instance.

use std::path::PathBuf;
use std::time::Duration;

use lib_utils::envs::{get_env_or, get_env_parse_or};

use crate::core::error::{AppError, Result};
use crate::debug::LogConfig;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5001/api";

/// Client configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CompassConfig {
    /// REST API root, without trailing slash
    pub api_base_url: String,
    /// Directory holding the local cache entries
    pub cache_dir: PathBuf,
    /// Per-request timeout for the HTTP client
    pub request_timeout: Duration,
    /// How often the reminder watcher checks recurring tasks
    pub reminder_interval: Duration,
    pub log: LogConfig,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            cache_dir: PathBuf::from(".compass-cache"),
            request_timeout: Duration::from_secs(15),
            reminder_interval: Duration::from_secs(60),
            log: LogConfig::default(),
        }
    }
}

impl CompassConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let api_base_url = get_env_or("COMPASS_API_BASE_URL", DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_string();
        let cache_dir = PathBuf::from(get_env_or("COMPASS_CACHE_DIR", ".compass-cache"));
        let timeout_secs: u64 = get_env_parse_or("COMPASS_REQUEST_TIMEOUT_SECS", 15)?;
        let reminder_secs: u64 = get_env_parse_or("COMPASS_REMINDER_INTERVAL_SECS", 60)?;

        Ok(Self {
            api_base_url,
            cache_dir,
            request_timeout: Duration::from_secs(timeout_secs),
            reminder_interval: Duration::from_secs(reminder_secs),
            log: LogConfig::from_env(),
        })
    }

    /// Point the client at another API root (tests, staging).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(AppError::Config(format!(
                "COMPASS_API_BASE_URL must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }

        let timeout = self.request_timeout.as_secs();
        if !(1..=120).contains(&timeout) {
            return Err(AppError::Config(
                "COMPASS_REQUEST_TIMEOUT_SECS must be between 1 and 120".to_string(),
            ));
        }

        if self.reminder_interval.is_zero() {
            return Err(AppError::Config(
                "COMPASS_REMINDER_INTERVAL_SECS must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
