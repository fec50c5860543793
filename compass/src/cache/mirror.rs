use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use super::{CacheKey, LocalCache};
use crate::core::error::Result;

/// Typed view of one cache entry.
///
/// Invalidation rule: the entry is replaced wholesale by [`Mirror::replace`] with the
/// latest server-confirmed value. It is never merged or patched in place.
pub struct Mirror<T> {
    cache: Arc<dyn LocalCache>,
    key: CacheKey,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Mirror<T> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            key: self.key,
            _marker: PhantomData,
        }
    }
}

impl<T: Serialize + DeserializeOwned> Mirror<T> {
    pub fn new(cache: Arc<dyn LocalCache>, key: CacheKey) -> Self {
        Self {
            cache,
            key,
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> CacheKey {
        self.key
    }

    /// Last mirrored value.
    ///
    /// Missing, unreadable or undecodable entries all yield `None`: a bad mirror only
    /// costs the offline view, the next fetch rebuilds it.
    pub fn load(&self) -> Option<T> {
        let text = match self.cache.read(self.key) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to read cache entry");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding undecodable cache entry");
                None
            }
        }
    }

    /// Overwrite the entry.
    pub fn replace(&self, value: &T) -> Result<()> {
        let text = self.encode(value)?;
        self.write_encoded(&text)
    }

    /// Serialize a value for a later [`Mirror::write_encoded`].
    pub fn encode(&self, value: &T) -> Result<String> {
        Ok(serde_json::to_string(value)?)
    }

    /// Overwrite the entry with text produced by [`Mirror::encode`].
    pub fn write_encoded(&self, text: &str) -> Result<()> {
        self.cache.write(self.key, text)
    }

    pub fn clear(&self) -> Result<()> {
        self.cache.remove(self.key)
    }
}
