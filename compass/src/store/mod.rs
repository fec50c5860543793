//! # Entity Stores
//!
//! Client-side caches of every server collection, each synchronized pessimistically with
//! its REST endpoint and mirrored to the local cache.
//!
//! ## Module Structure
//!
//! ```text
//! store/
//! ├── mod.rs        - Syncable trait, reconciliation helpers
//! ├── entity.rs     - EntityStore<T>: one flat collection
//! ├── nested.rs     - ChildStore: collections nested inside a parent record
//! ├── singleton.rs  - SingletonStore<T>: one document (settings)
//! └── registry.rs   - Stores: all twelve stores plus the bespoke actions
//! ```
//!
//! ## Reconciliation
//!
//! | Action          | Local effect after the server confirms            |
//! |-----------------|---------------------------------------------------|
//! | `fetch_all()`   | array replaced wholesale                          |
//! | `add(draft)`    | server record appended (replaces a same-id entry) |
//! | `update(rec)`   | same-id entry replaced by the server's copy       |
//! | `delete(id)`    | same-id entry removed                             |
//!
//! A failed call changes nothing locally.

mod entity;
mod nested;
mod registry;
mod singleton;

pub use entity::{EntityStore, StoreState};
pub use nested::ChildStore;
pub use registry::Stores;
pub use singleton::SingletonStore;

use async_trait::async_trait;
use shared::Entity;

use crate::core::error::Result;

/// A store the bootstrap can fetch and a logout can clear.
#[async_trait]
pub trait Syncable: Send + Sync {
    fn name(&self) -> &'static str;

    /// Refresh from the server, returning the number of records held.
    async fn sync(&self) -> Result<usize>;

    /// Drop in-memory contents.
    fn clear(&self);
}

#[async_trait]
impl<T: Entity> Syncable for EntityStore<T> {
    fn name(&self) -> &'static str {
        EntityStore::name(self)
    }

    async fn sync(&self) -> Result<usize> {
        self.fetch_all().await
    }

    fn clear(&self) {
        EntityStore::clear(self)
    }
}

pub(crate) mod reconcile {
    use shared::Entity;

    /// Replace the entry with the same id, or append. Keeps one entry per id.
    pub fn upsert<T: Entity>(items: &mut Vec<T>, record: T) {
        match items.iter_mut().find(|item| item.id() == record.id()) {
            Some(slot) => *slot = record,
            None => items.push(record),
        }
    }

    /// Remove every entry with `id`. Returns whether anything was removed.
    pub fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: &str) -> bool {
        let before = items.len();
        items.retain(|item| item.id() != id);
        items.len() != before
    }

}
