//! # Core Abstractions
//!
//! Core traits and error types shared by every layer of the client.
//!
//! ## Modules
//!
//! - **[`error`]**: Application error type (`AppError`, `Result<T>`)
//! - **[`service`]**: Endpoint traits the stores are written against
//!
//! ## Dependency Injection
//!
//! Stores hold `Arc<dyn Collection<T>>` rather than the concrete HTTP client:
//!
//! ```rust,ignore
//! // In production: REST endpoints backed by the shared ApiClient
//! let wallets: Arc<dyn Collection<Wallet>> = Arc::new(RestCollection::new(api.clone(), "/wallets"));
//!
//! // In tests: an in-memory fake
//! let wallets: Arc<dyn Collection<Wallet>> = Arc::new(FakeCollection::default());
//! ```

pub mod error;
pub mod service;

pub use error::{AppError, Result};
pub use service::{ApiService, Collection, Document, NestedCollection};
