//! # Logging
//!
//! Structured logging via `tracing`, configured from the environment.
//!
//! - **[`config`]**: [`LogConfig`] (`COMPASS_LOG_DIR`, `RUST_LOG`, `COMPASS_FILE_LOG`)
//! - **[`logger`]**: subscriber installation

pub mod config;
pub mod logger;

pub use config::LogConfig;
pub use logger::init;
