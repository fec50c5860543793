//! # External Services
//!
//! - [`api`]: the REST API client and the REST-backed endpoint implementations

pub mod api;
