//! Cache manager facade
//!
//! Binds exactly one backend at construction time and exposes the uniform
//! store contract on top of it. A requested remote backend that cannot be
//! brought up degrades to the local directory instead of failing; the
//! decision is made once and is visible through `storage_info()`.

use std::path::PathBuf;

use application::ports::{AssessmentStorePort, BackendKind, StorageError, StorageInfo};
use async_trait::async_trait;
use chrono::Utc;
use domain::{CacheKey, CacheRecord};
use serde_json::Value;
use tracing::{info, warn};

use crate::config::StorageSettings;

use super::{LocalStore, S3Store};

/// The backend a manager bound at construction
enum Backend {
    Local(LocalStore),
    Remote(S3Store),
}

/// Facade over the local and remote cache backends
///
/// Owns its backend for its whole lifetime. Every write stamps `cached_at`
/// with the current time; staleness stays a caller concern.
pub struct CacheManager {
    backend: Backend,
    local_dir: PathBuf,
    requested_bucket: Option<String>,
    fallback_reason: Option<String>,
}

impl std::fmt::Debug for CacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheManager")
            .field("backend", &self.storage_info().backend)
            .field("local_dir", &self.local_dir)
            .finish_non_exhaustive()
    }
}

impl CacheManager {
    /// Select a backend and build the manager
    ///
    /// Remote storage is used only when `use_remote` is set, a bucket is
    /// configured, and the bucket handle comes up; any of those failing
    /// downgrades to the local directory with the reason logged once here
    /// and recorded for `storage_info()`.
    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Self {
        if !settings.use_remote {
            info!(dir = %settings.local_dir.display(), "Using local cache storage");
            return Self::local(settings, None, None);
        }

        let Some(bucket) = settings.bucket.as_deref().filter(|b| !b.is_empty()) else {
            let reason = "remote storage requested but no bucket configured".to_string();
            warn!("{reason}; falling back to local storage");
            return Self::local(settings, None, Some(reason));
        };

        match S3Store::connect(bucket, &settings.region, settings.endpoint.as_deref()) {
            Ok(store) => {
                info!(bucket = %bucket, region = %settings.region, "Using remote cache storage");
                Self {
                    backend: Backend::Remote(store),
                    local_dir: settings.local_dir.clone(),
                    requested_bucket: Some(bucket.to_string()),
                    fallback_reason: None,
                }
            },
            Err(e) => {
                let reason = format!("remote storage unavailable: {e}");
                warn!(bucket = %bucket, "{reason}; falling back to local storage");
                Self::local(settings, Some(bucket.to_string()), Some(reason))
            },
        }
    }

    fn local(
        settings: &StorageSettings,
        requested_bucket: Option<String>,
        fallback_reason: Option<String>,
    ) -> Self {
        Self {
            backend: Backend::Local(LocalStore::new(settings.local_dir.clone())),
            local_dir: settings.local_dir.clone(),
            requested_bucket,
            fallback_reason,
        }
    }
}

#[async_trait]
impl AssessmentStorePort for CacheManager {
    async fn get(&self, key: &CacheKey) -> Result<Option<CacheRecord>, StorageError> {
        match &self.backend {
            Backend::Local(store) => store.get(key).await,
            Backend::Remote(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &CacheKey, document: Value) -> Result<(), StorageError> {
        // The write timestamp is owned here, not by callers
        let record = CacheRecord::stamp(document, Utc::now())
            .map_err(|e| StorageError::Encode(e.to_string()))?;

        match &self.backend {
            Backend::Local(store) => store.set(key, &record).await,
            Backend::Remote(store) => store.set(key, &record).await,
        }
    }

    async fn list_keys(&self) -> Result<Vec<CacheKey>, StorageError> {
        match &self.backend {
            Backend::Local(store) => store.list_keys().await,
            Backend::Remote(store) => store.list_keys().await,
        }
    }

    async fn delete(&self, key: &CacheKey) -> Result<bool, StorageError> {
        match &self.backend {
            Backend::Local(store) => store.delete(key).await,
            Backend::Remote(store) => store.delete(key).await,
        }
    }

    async fn clear_all(&self) -> Result<u64, StorageError> {
        match &self.backend {
            Backend::Local(store) => store.clear().await,
            Backend::Remote(store) => store.clear().await,
        }
    }

    fn storage_info(&self) -> StorageInfo {
        let (backend, location) = match &self.backend {
            Backend::Local(store) => (BackendKind::Local, store.dir().display().to_string()),
            Backend::Remote(store) => {
                (BackendKind::Remote, format!("s3://{}/", store.bucket_name()))
            },
        };

        StorageInfo {
            backend,
            location,
            local_dir: self.local_dir.clone(),
            bucket: self.requested_bucket.clone(),
            fallback_reason: self.fallback_reason.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn local_settings(dir: &TempDir) -> StorageSettings {
        StorageSettings {
            use_remote: false,
            bucket: None,
            region: "us-east-1".to_string(),
            endpoint: None,
            local_dir: dir.path().to_path_buf(),
            ttl_days: 7,
        }
    }

    #[tokio::test]
    async fn local_settings_bind_the_local_backend() {
        let dir = TempDir::new().unwrap();
        let manager = CacheManager::from_settings(&local_settings(&dir));

        let info = manager.storage_info();
        assert_eq!(info.backend, BackendKind::Local);
        assert_eq!(info.local_dir, dir.path());
        assert!(info.fallback_reason.is_none());
        assert!(info.bucket.is_none());
    }

    #[tokio::test]
    async fn remote_without_bucket_falls_back_to_local() {
        let dir = TempDir::new().unwrap();
        let settings = StorageSettings {
            use_remote: true,
            ..local_settings(&dir)
        };
        let manager = CacheManager::from_settings(&settings);

        let info = manager.storage_info();
        assert_eq!(info.backend, BackendKind::Local);
        assert!(
            info.fallback_reason
                .as_deref()
                .is_some_and(|r| r.contains("no bucket"))
        );

        // The degraded manager still works against the local directory
        let key = CacheKey::derive("slack");
        manager.set(&key, json!({"product": "slack"})).await.unwrap();
        let record = manager.get(&key).await.unwrap().unwrap();
        assert_eq!(record.document["product"], json!("slack"));
    }

    #[tokio::test]
    async fn empty_bucket_name_counts_as_unconfigured() {
        let dir = TempDir::new().unwrap();
        let settings = StorageSettings {
            use_remote: true,
            bucket: Some(String::new()),
            ..local_settings(&dir)
        };
        let manager = CacheManager::from_settings(&settings);
        assert_eq!(manager.storage_info().backend, BackendKind::Local);
    }

    #[tokio::test]
    async fn set_stamps_cached_at() {
        let dir = TempDir::new().unwrap();
        let manager = CacheManager::from_settings(&local_settings(&dir));
        let key = CacheKey::derive("slack");

        let before = Utc::now();
        manager.set(&key, json!({"a": 1})).await.unwrap();

        let record = manager.get(&key).await.unwrap().unwrap();
        assert!(record.cached_at >= before);
        assert!(record.cached_at <= Utc::now());
    }

    #[tokio::test]
    async fn set_overwrites_caller_supplied_cached_at() {
        let dir = TempDir::new().unwrap();
        let manager = CacheManager::from_settings(&local_settings(&dir));
        let key = CacheKey::derive("slack");

        manager
            .set(&key, json!({"cached_at": "1999-01-01T00:00:00Z", "a": 1}))
            .await
            .unwrap();

        let record = manager.get(&key).await.unwrap().unwrap();
        assert!(record.cached_at.timestamp() > 946_684_800); // year 2000
        assert!(!record.document.contains_key("cached_at"));
    }

    #[tokio::test]
    async fn set_rejects_non_object_documents() {
        let dir = TempDir::new().unwrap();
        let manager = CacheManager::from_settings(&local_settings(&dir));
        let key = CacheKey::derive("slack");

        let err = manager.set(&key, json!("just a string")).await.unwrap_err();
        assert!(matches!(err, StorageError::Encode(_)));
    }

    #[tokio::test]
    async fn operations_delegate_end_to_end() {
        let dir = TempDir::new().unwrap();
        let manager = CacheManager::from_settings(&local_settings(&dir));

        for name in ["a", "b"] {
            manager
                .set(&CacheKey::derive(name), json!({"name": name}))
                .await
                .unwrap();
        }
        assert_eq!(manager.list_keys().await.unwrap().len(), 2);

        assert!(manager.delete(&CacheKey::derive("a")).await.unwrap());
        assert!(!manager.delete(&CacheKey::derive("a")).await.unwrap());

        assert_eq!(manager.clear_all().await.unwrap(), 1);
        assert!(manager.list_keys().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn local_info_location_is_the_directory() {
        let dir = TempDir::new().unwrap();
        let manager = CacheManager::from_settings(&local_settings(&dir));
        let info = manager.storage_info();
        assert_eq!(info.location, dir.path().display().to_string());
    }
}
