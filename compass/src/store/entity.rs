//! # Entity Store
//!
//! Client-side cache of one entity collection, kept consistent with its REST endpoint.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use parking_lot::{Mutex, RwLock};
use shared::Entity;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::reconcile::{remove_by_id, upsert};
use crate::cache::Mirror;
use crate::core::error::Result;
use crate::core::service::Collection;

/// Snapshot of a store
#[derive(Debug, Clone, PartialEq)]
pub struct StoreState<T> {
    pub items: Vec<T>,
    pub is_loading: bool,
}

impl<T> Default for StoreState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_loading: false,
        }
    }
}

struct StoreInner<T: Entity> {
    endpoint: Arc<dyn Collection<T>>,
    state: RwLock<StoreState<T>>,
    mirror: Mirror<Vec<T>>,
    revision: watch::Sender<u64>,
    /// Fetches in flight; `is_loading` stays set until the last one lands.
    fetches: AtomicUsize,
    /// Snapshot sequence: taken under the state lock, checked before writing the mirror.
    snapshots: AtomicU64,
    persisted: Mutex<u64>,
}

/// Cache of one collection, synchronized pessimistically with the server.
///
/// Every mutation waits for the server's answer before touching the local array, so a
/// failed call leaves the store exactly as it was. The array holds at most one record per
/// id. Cloning is cheap and yields a handle to the same store.
///
/// Locks are only held for synchronous reconciliation, never across an `.await`.
/// Concurrent calls are not serialized: responses are applied in arrival order.
pub struct EntityStore<T: Entity> {
    inner: Arc<StoreInner<T>>,
}

impl<T: Entity> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Entity> EntityStore<T> {
    /// Create a store, hydrated from its mirror for offline display.
    pub fn new(endpoint: Arc<dyn Collection<T>>, mirror: Mirror<Vec<T>>) -> Self {
        let items = mirror.load().unwrap_or_default();
        debug!(store = T::KIND, cached = items.len(), "Store hydrated from cache");
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                endpoint,
                state: RwLock::new(StoreState {
                    items,
                    is_loading: false,
                }),
                mirror,
                revision,
                fetches: AtomicUsize::new(0),
                snapshots: AtomicU64::new(0),
                persisted: Mutex::new(0),
            }),
        }
    }

    /// Collection name, for logs and sync reports.
    pub fn name(&self) -> &'static str {
        T::KIND
    }

    /// Copy of the current records.
    pub fn items(&self) -> Vec<T> {
        self.inner.state.read().items.clone()
    }

    pub fn snapshot(&self) -> StoreState<T> {
        self.inner.state.read().clone()
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.inner.state.read().items.iter().find(|item| item.id() == id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.inner.state.read().items.iter().any(|item| item.id() == id)
    }

    pub fn len(&self) -> usize {
        self.inner.state.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.read().is_loading
    }

    /// Receiver that observes a new revision after every local change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    /// Current revision number.
    pub fn revision(&self) -> u64 {
        *self.inner.revision.borrow()
    }

    /// Replace the local array with the server's collection.
    ///
    /// On failure the array is left untouched and the error is returned. The loading
    /// flag is cleared once no other fetch is in flight.
    pub async fn fetch_all(&self) -> Result<usize> {
        self.begin_fetch();
        let start = Instant::now();

        match self.inner.endpoint.list().await {
            Ok(items) => {
                let count = items.len();
                self.apply(|state| {
                    state.items = items;
                    state.is_loading = self.end_fetch();
                });
                info!(
                    store = T::KIND,
                    count,
                    duration_ms = start.elapsed().as_millis(),
                    "Store fetched"
                );
                Ok(count)
            }
            Err(e) => {
                {
                    let mut state = self.inner.state.write();
                    state.is_loading = self.end_fetch();
                }
                warn!(store = T::KIND, path = self.inner.endpoint.path(), error = %e, "Store fetch failed");
                Err(e)
            }
        }
    }

    /// Create a record and append the server's copy.
    pub async fn add(&self, draft: &T::Draft) -> Result<T> {
        let created = self.inner.endpoint.create(draft).await?;
        debug!(store = T::KIND, id = created.id(), "Record added");
        let local = created.clone();
        self.apply(move |state| upsert(&mut state.items, local));
        Ok(created)
    }

    /// Send the full record and replace the local entry with the server's answer.
    pub async fn update(&self, record: &T) -> Result<T> {
        let updated = self.inner.endpoint.update(record).await?;
        debug!(store = T::KIND, id = updated.id(), "Record updated");
        let local = updated.clone();
        self.apply(move |state| upsert(&mut state.items, local));
        Ok(updated)
    }

    /// Delete a record on the server, then drop it locally.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.inner.endpoint.delete(id).await?;
        debug!(store = T::KIND, id, "Record deleted");
        self.apply(|state| {
            remove_by_id(&mut state.items, id);
        });
        Ok(())
    }

    /// Drop the in-memory records (session end). The persisted mirror is kept.
    pub fn clear(&self) {
        self.apply_without_persist(|state| {
            state.items.clear();
            state.is_loading = false;
        });
    }

    /// Merge server-confirmed records by id.
    pub(crate) fn upsert_confirmed(&self, records: Vec<T>) {
        self.apply(move |state| {
            for record in records {
                upsert(&mut state.items, record);
            }
        });
    }

    /// Replace the whole array with server-confirmed records.
    pub(crate) fn replace_confirmed(&self, records: Vec<T>) {
        self.apply(move |state| state.items = records);
    }

    /// Drop a record the server already removed.
    pub(crate) fn remove_confirmed(&self, id: &str) {
        self.apply(|state| {
            remove_by_id(&mut state.items, id);
        });
    }

    /// Patch one record in place. Returns `None` when no record has that id.
    pub(crate) fn patch<R>(&self, id: &str, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let mut result = None;
        self.apply(|state| {
            if let Some(item) = state.items.iter_mut().find(|item| item.id() == id) {
                result = Some(f(item));
            }
        });
        result
    }

    fn begin_fetch(&self) {
        let mut state = self.inner.state.write();
        self.inner.fetches.fetch_add(1, Ordering::SeqCst);
        state.is_loading = true;
    }

    /// Call under the write lock. Returns whether other fetches are still running.
    fn end_fetch(&self) -> bool {
        let previous = self
            .inner
            .fetches
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| Some(n.saturating_sub(1)))
            .unwrap_or(0);
        previous > 1
    }

    /// Mutate under the write lock, persist, then publish a new revision.
    ///
    /// The array is serialized while the lock is held and written to the cache after it
    /// is released. A snapshot older than the last one written is dropped, so the mirror
    /// never goes back to an earlier state.
    fn apply(&self, f: impl FnOnce(&mut StoreState<T>)) {
        let (sequence, encoded) = {
            let mut state = self.inner.state.write();
            f(&mut *state);
            let sequence = self.inner.snapshots.fetch_add(1, Ordering::SeqCst) + 1;
            (sequence, self.inner.mirror.encode(&state.items))
        };
        self.persist(sequence, encoded);
        self.bump();
    }

    fn persist(&self, sequence: u64, encoded: Result<String>) {
        let mut persisted = self.inner.persisted.lock();
        if sequence < *persisted {
            return;
        }
        match encoded.and_then(|text| self.inner.mirror.write_encoded(&text)) {
            Ok(()) => *persisted = sequence,
            Err(e) => {
                warn!(store = T::KIND, key = %self.inner.mirror.key(), error = %e, "Failed to persist store");
            }
        }
    }

    fn apply_without_persist(&self, f: impl FnOnce(&mut StoreState<T>)) {
        {
            let mut state = self.inner.state.write();
            f(&mut *state);
        }
        self.bump();
    }

    fn bump(&self) {
        self.inner.revision.send_modify(|rev| *rev += 1);
    }
}
