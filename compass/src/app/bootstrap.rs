//! # Store Bootstrap
//!
//! Fetches every store concurrently once a session is established.

use std::time::{Duration, Instant};

use futures::future::join_all;
use tracing::{info, warn};

use crate::core::error::AppError;
use crate::store::Syncable;

/// Outcome of one bootstrap run
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    /// `(store, records held)` for every store that synced
    pub synced: Vec<(&'static str, usize)>,
    /// `(store, error)` for every store that failed
    pub failures: Vec<(&'static str, AppError)>,
    pub elapsed: Duration,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// One-line summary of the failed stores, for a toast.
    pub fn failure_summary(&self) -> Option<String> {
        if self.failures.is_empty() {
            return None;
        }
        let names: Vec<&str> = self.failures.iter().map(|(name, _)| *name).collect();
        Some(format!("Could not load {}", names.join(", ")))
    }
}

/// Run every store's fetch concurrently and wait for all of them.
///
/// A failing store never cancels the others; it keeps the contents it held.
pub async fn sync_all(stores: &[&dyn Syncable]) -> SyncReport {
    let start = Instant::now();
    info!(stores = stores.len(), "Bootstrapping stores");

    let results = join_all(stores.iter().map(|store| async move { (store.name(), store.sync().await) })).await;

    let mut report = SyncReport::default();
    for (name, result) in results {
        match result {
            Ok(count) => report.synced.push((name, count)),
            Err(e) => {
                warn!(store = name, error = %e, "Store failed to bootstrap");
                report.failures.push((name, e));
            }
        }
    }
    report.elapsed = start.elapsed();

    info!(
        synced = report.synced.len(),
        failed = report.failures.len(),
        duration_ms = report.elapsed.as_millis(),
        "Bootstrap finished"
    );
    report
}
