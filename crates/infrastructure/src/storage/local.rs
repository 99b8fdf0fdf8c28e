//! Local filesystem cache backend
//!
//! Persists one pretty-printed `<key>.json` file per record inside a
//! configured directory. Corrupt files are cache misses, never errors; the
//! directory is created lazily on the first write.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use application::ports::StorageError;
use domain::{CacheKey, CacheRecord};
use tracing::{debug, instrument, warn};

/// Filesystem-backed cache store
#[derive(Debug, Clone)]
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at a directory
    ///
    /// The directory does not need to exist yet; it is created on the
    /// first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory the store writes into
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Load the record for a key
    #[instrument(skip(self), fields(key = %key), level = "debug")]
    pub async fn get(&self, key: &CacheKey) -> Result<Option<CacheRecord>, StorageError> {
        let path = self.path_for(key);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Transport(e.to_string())),
        };

        match serde_json::from_slice::<CacheRecord>(&bytes) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                // Corruption is a miss; the next write replaces the file
                warn!(key = %key, error = %e, "Corrupt cache file treated as miss");
                Ok(None)
            },
        }
    }

    /// Write the record for a key, overwriting any existing file
    #[instrument(skip(self, record), fields(key = %key), level = "debug")]
    pub async fn set(&self, key: &CacheKey, record: &CacheRecord) -> Result<(), StorageError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| StorageError::Encode(e.to_string()))?;

        tokio::fs::write(self.path_for(key), bytes)
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        debug!(key = %key, "Cache record written");
        Ok(())
    }

    /// List keys present in the directory
    ///
    /// Files whose stems are not valid cache keys are skipped.
    pub async fn list_keys(&self) -> Result<Vec<CacheKey>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            // No directory yet means nothing has been cached
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::Transport(e.to_string())),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?
        {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match CacheKey::parse(stem) {
                Ok(key) => keys.push(key),
                Err(_) => debug!(file = %path.display(), "Skipping foreign file in cache dir"),
            }
        }
        Ok(keys)
    }

    /// Delete the record for a key, reporting whether a file was removed
    #[instrument(skip(self), fields(key = %key), level = "debug")]
    pub async fn delete(&self, key: &CacheKey) -> Result<bool, StorageError> {
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::Transport(e.to_string())),
        }
    }

    /// Delete every record, returning the count removed
    ///
    /// Per-file failures are logged and skipped.
    pub async fn clear(&self) -> Result<u64, StorageError> {
        let mut removed = 0u64;
        for key in self.list_keys().await? {
            match self.delete(&key).await {
                Ok(true) => removed += 1,
                Ok(false) => {},
                Err(e) => warn!(key = %key, error = %e, "Failed to delete cache file"),
            }
        }
        debug!(removed, "Cache cleared");
        Ok(removed)
    }
}
