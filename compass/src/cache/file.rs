use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{CacheKey, LocalCache};
use crate::core::error::{AppError, Result};

/// Directory-backed [`LocalCache`]: one `<key>.json` file per entry.
///
/// Writes go to a temporary sibling first and are renamed into place, so a crash
/// mid-write leaves the previous entry intact.
#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Open (creating if needed) a cache directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::Cache(format!("Failed to create cache dir {}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: CacheKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }
}

impl LocalCache for FileCache {
    fn read(&self, key: CacheKey) -> Result<Option<String>> {
        match fs::read_to_string(self.entry_path(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Cache(format!("Failed to read {}: {}", key, e))),
        }
    }

    fn write(&self, key: CacheKey, value: &str) -> Result<()> {
        let path = self.entry_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| AppError::Cache(format!("Failed to write {}: {}", key, e)))?;
        fs::rename(&tmp, &path).map_err(|e| AppError::Cache(format!("Failed to commit {}: {}", key, e)))?;
        debug!(key = %key, bytes = value.len(), "Cache entry written");
        Ok(())
    }

    fn remove(&self, key: CacheKey) -> Result<()> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Cache(format!("Failed to remove {}: {}", key, e))),
        }
    }
}
