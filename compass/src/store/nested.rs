//! # Nested Stores
//!
//! Collections that live inside a parent record: the tasks of an airdrop and the gas logs
//! of a wallet. The parent store holds the data; a [`ChildStore`] only routes the calls
//! and patches the parent's nested array after the server confirms.

use std::marker::PhantomData;
use std::sync::Arc;

use shared::{Entity, HasChildren};
use tracing::debug;

use super::entity::EntityStore;
use super::reconcile::{remove_by_id, upsert};
use crate::core::error::{AppError, Result};
use crate::core::service::NestedCollection;

pub struct ChildStore<P, C>
where
    P: HasChildren<C>,
    C: Entity,
{
    parent: EntityStore<P>,
    endpoint: Arc<dyn NestedCollection<C>>,
    _marker: PhantomData<fn() -> C>,
}

impl<P, C> Clone for ChildStore<P, C>
where
    P: HasChildren<C>,
    C: Entity,
{
    fn clone(&self) -> Self {
        Self {
            parent: self.parent.clone(),
            endpoint: Arc::clone(&self.endpoint),
            _marker: PhantomData,
        }
    }
}

impl<P, C> ChildStore<P, C>
where
    P: HasChildren<C>,
    C: Entity,
{
    pub fn new(parent: EntityStore<P>, endpoint: Arc<dyn NestedCollection<C>>) -> Self {
        Self {
            parent,
            endpoint,
            _marker: PhantomData,
        }
    }

    /// Children of one parent, or `None` for an unknown parent.
    pub fn items(&self, parent_id: &str) -> Option<Vec<C>> {
        self.parent.get(parent_id).map(|p| p.children().to_vec())
    }

    pub async fn add(&self, parent_id: &str, draft: &C::Draft) -> Result<C> {
        self.ensure_parent(parent_id)?;
        let created = self.endpoint.create(parent_id, draft).await?;
        debug!(store = C::KIND, parent = parent_id, id = created.id(), "Nested record added");
        let local = created.clone();
        self.parent
            .patch(parent_id, move |p| upsert(p.children_mut(), local));
        Ok(created)
    }

    pub async fn update(&self, parent_id: &str, record: &C) -> Result<C> {
        self.ensure_parent(parent_id)?;
        let updated = self.endpoint.update(parent_id, record).await?;
        debug!(store = C::KIND, parent = parent_id, id = updated.id(), "Nested record updated");
        let local = updated.clone();
        self.parent
            .patch(parent_id, move |p| upsert(p.children_mut(), local));
        Ok(updated)
    }

    pub async fn delete(&self, parent_id: &str, id: &str) -> Result<()> {
        self.ensure_parent(parent_id)?;
        self.endpoint.delete(parent_id, id).await?;
        debug!(store = C::KIND, parent = parent_id, id, "Nested record deleted");
        self.parent.patch(parent_id, |p| {
            remove_by_id(p.children_mut(), id);
        });
        Ok(())
    }

    fn ensure_parent(&self, parent_id: &str) -> Result<()> {
        if self.parent.contains(parent_id) {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("{} '{}'", P::KIND, parent_id)))
        }
    }
}
