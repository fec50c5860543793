//! # Shared Data Transfer Objects Library
//!
//! This library defines the contract between the Compass client and the REST API.
//! All DTOs use JSON serialization via `serde`.
//!
//! ## Structure
//!
//! - **[`dto`]**: Records, creation drafts and request bodies for every API resource
//!   - **[`dto::Entity`]**: Implemented by every collection record (id + draft type)
//!   - **[`dto::HasChildren`]**: Records owning a nested collection
//! - **[`utils`]**: Shared utility functions
//!   - **[`utils::format_address`]**: Format wallet addresses for display
//!   - **[`utils::truncate_address`]**: Truncate addresses with ellipsis
//!   - **[`utils::format_usd`]**: Format dollar amounts
//!
//! ## Wire Format
//!
//! - Field names are **camelCase** on the wire
//! - Optional fields are omitted from JSON when `None`
//! - Calendar dates serialize as `YYYY-MM-DD`, timestamps as RFC 3339
//!
//! ## Usage
//!
//! ```rust
//! use shared::dto::{Entity, Wallet};
//! use shared::utils::truncate_address;
//!
//! let wallet: Wallet = serde_json::from_str(
//!     r#"{"id":"w1","address":"0x1234567890abcdef1234567890abcdef12345678","name":"Main","blockchain":"Ethereum"}"#,
//! ).unwrap();
//!
//! assert_eq!(wallet.id(), "w1");
//! assert_eq!(truncate_address(&wallet.address), "0x12...5678");
//! ```

pub mod dto;
pub mod utils;

// Re-export commonly used types for convenience
pub use dto::*;
pub use utils::*;
