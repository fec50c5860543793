//! # Compass API Client Module
//!
//! HTTP client for the Compass REST API. It is the single network boundary of the crate.
//!
//! ## Module Structure
//!
//! ```text
//! api/
//! ├── mod.rs         - Module exports and documentation
//! ├── client.rs      - ApiClient: base URL, bearer token, error normalization
//! ├── auth.rs        - Login, register, current user
//! ├── collection.rs  - Generic REST collections (flat and nested)
//! ├── settings.rs    - The /settings singleton
//! ├── airdrops.rs    - Batch update
//! ├── recurring.rs   - Complete a recurring task
//! ├── watchlist.rs   - Promote a watchlist item to an airdrop
//! └── alerts.rs      - Mark all alerts read
//! ```
//!
//! ## Error Normalization
//!
//! | Outcome                        | Error                                  |
//! |--------------------------------|----------------------------------------|
//! | connection failure             | `AppError::Network`                    |
//! | client timeout                 | `AppError::Timeout`                    |
//! | 401 with a bearer token        | `AppError::Unauthorized` (session cleared) |
//! | other non-2xx                  | `AppError::Http { status, message }`   |
//! | 2xx with an undecodable body   | `AppError::Decode`                     |
//!
//! No retries, no de-duplication, no response caching.

pub mod airdrops;
pub mod alerts;
pub mod auth;
pub mod client;
pub mod collection;
pub mod recurring;
pub mod settings;
pub mod watchlist;

pub use client::ApiClient;
pub use collection::{RestCollection, RestNested};
pub use settings::RestDocument;
