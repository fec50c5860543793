//! # Crypto Airdrop Compass - Client Sync Layer
//!
//! Keeps a local, persisted mirror of a user's airdrop-farming data in sync with the
//! Compass REST API.
//!
//! ## Features
//!
//! - **Entity Stores**: twelve client-side collections (wallets, airdrops, recurring tasks,
//!   settings, watchlist, yield positions, transactions, strategy notes, learning
//!   resources, airdrop templates, alerts, badges), updated pessimistically
//! - **Single HTTP Boundary**: bearer token injection, error normalization, 401 handling
//! - **Concurrent Bootstrap**: every store fetched at once after login
//! - **Offline Re-display**: each store hydrates from its local cache mirror
//! - **Reports**: portfolio, cost and participation analytics over store snapshots
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              compass (this crate)                      │
//! ├────────────────────────────────────────────────────────┤
//! │  app       - App orchestrator, session, bootstrap      │
//! │  store     - EntityStore<T>, nested and singleton      │
//! │  services  - ApiClient and REST endpoints (reqwest)    │
//! │  cache     - LocalCache, FileCache, Mirror<T>          │
//! │  reports   - derived analytics                         │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ HTTP + JSON                  │ JSON files
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Compass API    │          │   COMPASS_CACHE_DIR     │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use compass::app::App;
//! use compass::config::CompassConfig;
//!
//! # async fn run() -> compass::core::Result<()> {
//! let mut app = App::new(CompassConfig::from_env()?)?;
//! if !app.restore().await? {
//!     app.login("farmer@example.com", "hunter22").await?;
//! }
//!
//! let airdrops = app.stores().airdrops.items();
//! println!("tracking {} airdrops", airdrops.len());
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod cache;
pub mod config;
pub mod core;
pub mod debug;
pub mod reports;
pub mod services;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
