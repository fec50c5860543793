//! Logging configuration from environment variables

use std::path::PathBuf;

use lib_utils::envs::get_env_or;

/// Logging system configuration
#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Log directory (daily rotated files)
    pub log_dir: PathBuf,
    /// Log level filter (e.g., "compass=debug,info")
    pub log_level: String,
    /// Write logs to `log_dir` in addition to stderr
    pub file_logging: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: "compass=info,warn".to_string(),
            file_logging: true,
        }
    }
}

impl LogConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            log_dir: PathBuf::from(get_env_or("COMPASS_LOG_DIR", "logs")),
            log_level: get_env_or("RUST_LOG", "compass=info,warn"),
            file_logging: get_env_or("COMPASS_FILE_LOG", "1") != "0",
        }
    }

    /// Path of today's log file prefix
    pub fn log_file(&self) -> PathBuf {
        self.log_dir.join("compass.log")
    }
}
