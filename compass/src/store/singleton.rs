//! # Singleton Store
//!
//! One document fetched and replaced as a whole, such as the user's settings.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use super::Syncable;
use crate::cache::Mirror;
use crate::core::error::Result;
use crate::core::service::Document;

struct SingletonInner<T> {
    name: &'static str,
    endpoint: Arc<dyn Document<T>>,
    value: RwLock<Option<T>>,
    loading: RwLock<bool>,
    mirror: Mirror<T>,
    revision: watch::Sender<u64>,
}

/// Pessimistic store for a single server document.
pub struct SingletonStore<T> {
    inner: Arc<SingletonInner<T>>,
}

impl<T> Clone for SingletonStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> SingletonStore<T>
where
    T: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(name: &'static str, endpoint: Arc<dyn Document<T>>, mirror: Mirror<T>) -> Self {
        let value = mirror.load();
        let (revision, _) = watch::channel(0);
        Self {
            inner: Arc::new(SingletonInner {
                name,
                endpoint,
                value: RwLock::new(value),
                loading: RwLock::new(false),
                mirror,
                revision,
            }),
        }
    }

    /// The fetched document, else the mirrored one, else the default.
    pub fn current(&self) -> T {
        self.inner.value.read().clone().unwrap_or_default()
    }

    /// Whether a document (fetched or mirrored) is held.
    pub fn is_loaded(&self) -> bool {
        self.inner.value.read().is_some()
    }

    pub fn is_loading(&self) -> bool {
        *self.inner.loading.read()
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.revision.subscribe()
    }

    pub async fn fetch(&self) -> Result<T> {
        *self.inner.loading.write() = true;
        let result = self.inner.endpoint.get().await;
        *self.inner.loading.write() = false;

        match result {
            Ok(doc) => {
                info!(store = self.inner.name, "Document fetched");
                self.store(doc.clone());
                Ok(doc)
            }
            Err(e) => {
                warn!(store = self.inner.name, path = self.inner.endpoint.path(), error = %e, "Document fetch failed");
                Err(e)
            }
        }
    }

    /// PUT the whole document and keep the server's answer.
    pub async fn update(&self, document: &T) -> Result<T> {
        let saved = self.inner.endpoint.put(document).await?;
        info!(store = self.inner.name, "Document updated");
        self.store(saved.clone());
        Ok(saved)
    }

    pub fn clear(&self) {
        *self.inner.value.write() = None;
        self.inner.revision.send_modify(|rev| *rev += 1);
    }

    fn store(&self, doc: T) {
        {
            let mut value = self.inner.value.write();
            if let Err(e) = self.inner.mirror.replace(&doc) {
                warn!(store = self.inner.name, key = %self.inner.mirror.key(), error = %e, "Failed to persist store");
            }
            *value = Some(doc);
        }
        self.inner.revision.send_modify(|rev| *rev += 1);
    }
}

#[async_trait]
impl<T> Syncable for SingletonStore<T>
where
    T: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static,
{
    fn name(&self) -> &'static str {
        self.inner.name
    }

    async fn sync(&self) -> Result<usize> {
        self.fetch().await.map(|_| 1)
    }

    fn clear(&self) {
        SingletonStore::clear(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheKey, LocalCache, MemoryCache};
    use crate::core::error::AppError;
    use crate::test_support::FakeDocument;
    use shared::{Settings, Theme};

    fn store(cache: &Arc<dyn LocalCache>, fake: &Arc<FakeDocument<Settings>>) -> SingletonStore<Settings> {
        SingletonStore::new("settings", fake.clone(), Mirror::new(cache.clone(), CacheKey::Settings))
    }

    #[tokio::test]
    async fn test_current_defaults_before_fetch() {
        let cache: Arc<dyn LocalCache> = Arc::new(MemoryCache::new());
        let fake = Arc::new(FakeDocument::new(Settings::default()));
        let settings = store(&cache, &fake);

        assert!(!settings.is_loaded());
        assert_eq!(settings.current(), Settings::default());
    }

    #[tokio::test]
    async fn test_update_replaces_and_mirrors() {
        let cache: Arc<dyn LocalCache> = Arc::new(MemoryCache::new());
        let fake = Arc::new(FakeDocument::new(Settings::default()));
        let settings = store(&cache, &fake);

        let mut changed = settings.fetch().await.unwrap();
        changed.theme = Theme::Light;
        settings.update(&changed).await.unwrap();

        assert_eq!(settings.current().theme, Theme::Light);
        let reopened = store(&cache, &fake);
        assert_eq!(reopened.current().theme, Theme::Light);
    }

    #[tokio::test]
    async fn test_failed_update_keeps_document() {
        let cache: Arc<dyn LocalCache> = Arc::new(MemoryCache::new());
        let fake = Arc::new(FakeDocument::new(Settings::default()));
        let settings = store(&cache, &fake);
        settings.fetch().await.unwrap();

        fake.fail_next(AppError::Network("down".to_string()));
        let mut changed = settings.current();
        changed.theme = Theme::Light;
        assert!(settings.update(&changed).await.is_err());

        assert_eq!(settings.current(), Settings::default());
        assert!(!settings.is_loading());
    }
}
