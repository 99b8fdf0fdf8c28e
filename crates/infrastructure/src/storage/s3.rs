//! S3-compatible cache backend
//!
//! Persists one `<key>.json` object per record in a single bucket,
//! uploaded with an `application/json` content type. Works against AWS S3
//! and S3-compatible stores (MinIO, Backblaze B2, ...) via a custom
//! endpoint.

use application::ports::StorageError;
use domain::{CacheKey, CacheRecord};
use s3::creds::Credentials;
use s3::error::S3Error;
use s3::{Bucket, Region};
use tracing::{debug, instrument, warn};

/// Object-store-backed cache store
pub struct S3Store {
    bucket: Box<Bucket>,
    bucket_name: String,
}

impl std::fmt::Debug for S3Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Store")
            .field("bucket", &self.bucket_name)
            .finish_non_exhaustive()
    }
}

impl S3Store {
    /// Connect to a bucket
    ///
    /// Credentials are read from the environment (`AWS_ACCESS_KEY_ID`,
    /// `AWS_SECRET_ACCESS_KEY` or an AWS profile). A custom endpoint
    /// selects an S3-compatible store.
    pub fn connect(
        bucket_name: &str,
        region: &str,
        endpoint: Option<&str>,
    ) -> Result<Self, StorageError> {
        let credentials = Credentials::default().map_err(|e| {
            StorageError::Transport(format!("credential loading failed: {e}"))
        })?;

        let region = match endpoint {
            Some(endpoint) => Region::Custom {
                region: region.to_string(),
                endpoint: endpoint.to_string(),
            },
            None => region
                .parse()
                .map_err(|e| StorageError::Transport(format!("invalid region {region}: {e}")))?,
        };

        let bucket = Bucket::new(bucket_name, region, credentials)
            .map_err(|e| StorageError::Transport(format!("bucket handle failed: {e}")))?
            .with_path_style(); // Required for MinIO and some S3-compatible services

        Ok(Self {
            bucket,
            bucket_name: bucket_name.to_string(),
        })
    }

    /// Bucket the store writes into
    #[must_use]
    pub fn bucket_name(&self) -> &str {
        &self.bucket_name
    }

    fn object_path(key: &CacheKey) -> String {
        format!("{key}.json")
    }

    /// Whether the object for a key exists
    async fn exists(&self, key: &CacheKey) -> Result<bool, StorageError> {
        match self.bucket.head_object(Self::object_path(key)).await {
            Ok((_, 200)) => Ok(true),
            Ok((_, 404)) => Ok(false),
            Ok((_, status)) => Err(StorageError::Transport(format!("HEAD returned {status}"))),
            Err(S3Error::HttpFailWithBody(404, _)) => Ok(false),
            Err(e) => Err(StorageError::Transport(e.to_string())),
        }
    }

    /// Load the record for a key
    ///
    /// Existence is checked before download; a missing object is a normal
    /// miss.
    #[instrument(skip(self), fields(key = %key), level = "debug")]
    pub async fn get(&self, key: &CacheKey) -> Result<Option<CacheRecord>, StorageError> {
        if !self.exists(key).await? {
            return Ok(None);
        }

        let response = match self.bucket.get_object(Self::object_path(key)).await {
            Ok(response) => response,
            Err(S3Error::HttpFailWithBody(404, _)) => return Ok(None),
            Err(e) => return Err(StorageError::Transport(e.to_string())),
        };

        match response.status_code() {
            200 => {},
            404 => return Ok(None),
            status => {
                return Err(StorageError::Transport(format!("GET returned {status}")));
            },
        }

        match serde_json::from_slice::<CacheRecord>(response.as_slice()) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                warn!(key = %key, error = %e, "Corrupt cache object treated as miss");
                Ok(None)
            },
        }
    }

    /// Upload the record for a key, overwriting unconditionally
    #[instrument(skip(self, record), fields(key = %key), level = "debug")]
    pub async fn set(&self, key: &CacheKey, record: &CacheRecord) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec_pretty(record)
            .map_err(|e| StorageError::Encode(e.to_string()))?;

        let response = self
            .bucket
            .put_object_with_content_type(Self::object_path(key), &bytes, "application/json")
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        if response.status_code() != 200 {
            return Err(StorageError::Transport(format!(
                "PUT returned {}",
                response.status_code()
            )));
        }

        debug!(key = %key, bucket = %self.bucket_name, "Cache object uploaded");
        Ok(())
    }

    /// List keys present in the bucket
    ///
    /// Only `.json` objects whose stems are valid cache keys are returned.
    pub async fn list_keys(&self) -> Result<Vec<CacheKey>, StorageError> {
        let pages = self
            .bucket
            .list(String::new(), None)
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        let mut keys = Vec::new();
        for page in pages {
            for object in page.contents {
                let Some(stem) = object.key.strip_suffix(".json") else {
                    continue;
                };
                match CacheKey::parse(stem) {
                    Ok(key) => keys.push(key),
                    Err(_) => debug!(object = %object.key, "Skipping foreign object in bucket"),
                }
            }
        }
        Ok(keys)
    }

    /// Delete the object for a key, reporting whether one was removed
    #[instrument(skip(self), fields(key = %key), level = "debug")]
    pub async fn delete(&self, key: &CacheKey) -> Result<bool, StorageError> {
        // S3 deletes are silently idempotent, so check existence first to
        // keep the local and remote contracts identical
        if !self.exists(key).await? {
            return Ok(false);
        }

        let response = self
            .bucket
            .delete_object(Self::object_path(key))
            .await
            .map_err(|e| StorageError::Transport(e.to_string()))?;

        match response.status_code() {
            200 | 204 => Ok(true),
            404 => Ok(false),
            status => Err(StorageError::Transport(format!("DELETE returned {status}"))),
        }
    }

    /// Delete every object, returning the count removed
    ///
    /// Per-object failures are logged and skipped.
    pub async fn clear(&self) -> Result<u64, StorageError> {
        let mut removed = 0u64;
        for key in self.list_keys().await? {
            match self.delete(&key).await {
                Ok(true) => removed += 1,
                Ok(false) => {},
                Err(e) => warn!(key = %key, error = %e, "Failed to delete cache object"),
            }
        }
        debug!(removed, bucket = %self.bucket_name, "Bucket cache cleared");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_paths_carry_the_json_suffix() {
        let key = CacheKey::derive("slack");
        assert_eq!(S3Store::object_path(&key), format!("{key}.json"));
    }
}
