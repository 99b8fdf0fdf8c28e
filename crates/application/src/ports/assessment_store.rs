//! Assessment store port - Interface for the persistent cache
//!
//! The storage contract distinguishes outcomes programmatically: a missing
//! or corrupt record is `Ok(None)` (corruption is logged by the
//! implementation), a transport problem is an explicit `Err`, and a remote
//! backend falling back to local storage is visible through
//! `storage_info()` rather than through per-operation behavior.

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use domain::{CacheKey, CacheRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Failures the storage layer reports to callers
///
/// Expected conditions (missing key, corrupt record) are not errors; see
/// the port documentation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// I/O, network, or permission failure talking to the backend
    #[error("Storage backend unavailable: {0}")]
    Transport(String),

    /// Document could not be serialized for storage
    #[error("Cache record encoding failed: {0}")]
    Encode(String),
}

/// Which backend a cache manager is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Filesystem directory of `<key>.json` files
    Local,
    /// S3-compatible bucket of `<key>.json` objects
    Remote,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Remote => write!(f, "remote"),
        }
    }
}

/// Diagnostic description of the active storage configuration
///
/// Purely informational; never a source of truth for data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageInfo {
    /// Backend the manager bound at construction
    pub backend: BackendKind,

    /// Human-readable location (directory path or `s3://bucket/`)
    pub location: String,

    /// Configured local directory (also the fallback destination)
    pub local_dir: PathBuf,

    /// Bucket name, when the remote backend is active or was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<String>,

    /// Why a requested remote backend was downgraded to local, if it was
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

/// Port for the persistent assessment cache
#[async_trait]
pub trait AssessmentStorePort: Send + Sync {
    /// Load the record stored under a key
    ///
    /// `Ok(None)` covers both a missing record and one that exists but no
    /// longer parses.
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheRecord>, StorageError>;

    /// Store a document under a key, stamping `cached_at`
    ///
    /// The document must be a JSON object; any existing record for the key
    /// is overwritten unconditionally.
    async fn set(&self, key: &CacheKey, document: Value) -> Result<(), StorageError>;

    /// List the keys currently present, in unspecified order
    async fn list_keys(&self) -> Result<Vec<CacheKey>, StorageError>;

    /// Delete the record for a key, reporting whether one was removed
    ///
    /// Absence is not an error; deleting twice returns `Ok(false)` the
    /// second time.
    async fn delete(&self, key: &CacheKey) -> Result<bool, StorageError>;

    /// Delete every record, returning how many were removed
    async fn clear_all(&self) -> Result<u64, StorageError>;

    /// Describe the active backend
    fn storage_info(&self) -> StorageInfo;
}

/// Extension trait for typed store operations
#[async_trait]
pub trait AssessmentStoreExt: AssessmentStorePort {
    /// Store any serializable document under a key
    async fn set_typed<T>(&self, key: &CacheKey, document: &T) -> Result<(), StorageError>
    where
        T: serde::Serialize + Send + Sync,
    {
        let value = serde_json::to_value(document).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.set(key, value).await
    }
}

// Blanket implementation for all store implementors
impl<T: AssessmentStorePort + ?Sized> AssessmentStoreExt for T {}
