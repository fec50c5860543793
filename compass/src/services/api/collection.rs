//! # REST Collections
//!
//! Generic [`Collection`] / [`NestedCollection`] implementations over [`ApiClient`].
//! One instance per resource family; the stores hold them as trait objects.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use shared::Entity;

use super::client::{segment, ApiClient};
use crate::core::error::Result;
use crate::core::service::{Collection, NestedCollection};

/// `{base}/{id}` with the id percent-encoded.
fn item_path(base: &str, id: &str) -> String {
    format!("{}/{}", base, segment(id))
}

/// `GET/POST {path}`, `PUT/DELETE {path}/{id}`
pub struct RestCollection<T> {
    api: Arc<ApiClient>,
    path: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> RestCollection<T> {
    pub fn new(api: Arc<ApiClient>, path: impl Into<String>) -> Self {
        Self {
            api,
            path: path.into(),
            _marker: PhantomData,
        }
    }

    fn item_path(&self, id: &str) -> String {
        item_path(&self.path, id)
    }
}

#[async_trait]
impl<T: Entity> Collection<T> for RestCollection<T> {
    fn path(&self) -> &str {
        &self.path
    }

    async fn list(&self) -> Result<Vec<T>> {
        self.api.get::<Vec<T>>(&self.path).await
    }

    async fn create(&self, draft: &T::Draft) -> Result<T> {
        self.api.send_json(Method::POST, &self.path, draft).await
    }

    async fn update(&self, record: &T) -> Result<T> {
        self.api
            .send_json(Method::PUT, &self.item_path(record.id()), record)
            .await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.api.delete(&self.item_path(id)).await
    }
}

/// `{parent_path}/{parent_id}/{segment}[/{id}]`
pub struct RestNested<C> {
    api: Arc<ApiClient>,
    parent_path: String,
    segment: String,
    _marker: PhantomData<fn() -> C>,
}

impl<C: Entity> RestNested<C> {
    /// e.g. `RestNested::new(api, "/airdrops", "tasks")`
    pub fn new(api: Arc<ApiClient>, parent_path: impl Into<String>, segment: impl Into<String>) -> Self {
        Self {
            api,
            parent_path: parent_path.into(),
            segment: segment.into(),
            _marker: PhantomData,
        }
    }

    fn collection_path(&self, parent_id: &str) -> String {
        item_path(&item_path(&self.parent_path, parent_id), &self.segment)
    }
}

#[async_trait]
impl<C: Entity> NestedCollection<C> for RestNested<C> {
    async fn create(&self, parent_id: &str, draft: &C::Draft) -> Result<C> {
        self.api
            .send_json(Method::POST, &self.collection_path(parent_id), draft)
            .await
    }

    async fn update(&self, parent_id: &str, record: &C) -> Result<C> {
        let path = item_path(&self.collection_path(parent_id), record.id());
        self.api.send_json(Method::PUT, &path, record).await
    }

    async fn delete(&self, parent_id: &str, id: &str) -> Result<()> {
        let path = item_path(&self.collection_path(parent_id), id);
        self.api.delete(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_path_keeps_id_in_one_segment() {
        assert_eq!(item_path("/wallets", "w_1"), "/wallets/w_1");
        assert_eq!(item_path("/wallets", "a/b?c#d"), "/wallets/a%2Fb%3Fc%23d");
        assert_eq!(item_path("/airdrops", "ä 1"), "/airdrops/%C3%A4%201");
    }

    #[test]
    fn test_nested_path_encodes_parent_and_child() {
        let tasks = item_path(&item_path(&item_path("/airdrops", "a/1"), "tasks"), "t?1");
        assert_eq!(tasks, "/airdrops/a%2F1/tasks/t%3F1");
    }
}
