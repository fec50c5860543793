use std::collections::HashMap;

use parking_lot::Mutex;

use super::{CacheKey, LocalCache};
use crate::core::error::Result;

/// In-memory [`LocalCache`].
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<CacheKey, String>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl LocalCache for MemoryCache {
    fn read(&self, key: CacheKey) -> Result<Option<String>> {
        Ok(self.entries.lock().get(&key).cloned())
    }

    fn write(&self, key: CacheKey, value: &str) -> Result<()> {
        self.entries.lock().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: CacheKey) -> Result<()> {
        self.entries.lock().remove(&key);
        Ok(())
    }
}
