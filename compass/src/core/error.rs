//! # Common Error Types
//!
//! Consolidated error handling for the Compass client.
//!
//! The taxonomy is deliberately flat: every failed call ends up as one [`AppError`]
//! carrying a human-readable message. Store actions never swallow errors; the app layer
//! turns them into toasts with [`AppError::user_message`].
//!
//! ## Error Categories
//!
//! - **Network / Timeout**: the request never produced a response
//! - **Http**: the server answered with a non-2xx status
//! - **Unauthorized**: the bearer token was rejected (session cleared)
//! - **Decode**: a 2xx body could not be parsed
//! - **NotFound**: a local lookup failed before any request was made
//! - **Cache / Config / Validation**: local failures
//!
//! ## Usage Pattern
//!
//! ```rust
//! use compass::core::error::AppError;
//!
//! let err = AppError::Http { status: 404, message: "Airdrop not found".to_string() };
//! assert_eq!(err.user_message(), "Airdrop not found");
//! assert_eq!(err.to_string(), "HTTP 404: Airdrop not found");
//! ```

use thiserror::Error;

/// Application-wide error type covering all error scenarios in the client.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    /// Connection refused, DNS failure, TLS failure...
    #[error("Network error: {0}")]
    Network(String),

    /// The HTTP client gave up waiting for a response.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-2xx response. `message` comes from the body when the server sent one.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The server rejected the bearer token. Local auth state has been cleared.
    #[error("Unauthorized: session expired")]
    Unauthorized,

    /// A successful response body could not be parsed.
    #[error("Failed to parse response: {0}")]
    Decode(String),

    /// A local lookup (parent record, cached entry) failed.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Reading or writing the local cache failed.
    #[error("Cache error: {0}")]
    Cache(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input rejected before it was sent.
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Toast text for this error.
    ///
    /// Server-provided messages are shown as-is; transport failures get a generic message.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Network(_) => "Network error. Please check your connection and try again.".to_string(),
            AppError::Timeout(_) => "The server took too long to respond. Please try again.".to_string(),
            AppError::Http { message, .. } => message.clone(),
            AppError::Unauthorized => "Your session has expired. Please log in again.".to_string(),
            AppError::Decode(_) => "Received an unexpected response from the server.".to_string(),
            AppError::NotFound(msg) | AppError::Validation(msg) => msg.clone(),
            AppError::Cache(_) => "Local storage is unavailable.".to_string(),
            AppError::Config(msg) => msg.clone(),
        }
    }

    /// True for errors caused by the transport rather than the server's answer.
    pub fn is_transport(&self) -> bool {
        matches!(self, AppError::Network(_) | AppError::Timeout(_))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::Timeout(err.to_string())
        } else if err.is_decode() {
            AppError::Decode(err.to_string())
        } else {
            AppError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decode(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Cache(err.to_string())
    }
}

impl From<lib_utils::envs::Error> for AppError {
    fn from(err: lib_utils::envs::Error) -> Self {
        AppError::Config(err.to_string())
    }
}
