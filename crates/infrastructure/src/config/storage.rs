//! Cache storage settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the assessment cache
///
/// `use_remote` selects the S3-compatible backend, subject to the fallback
/// rule applied by the cache manager at construction. The local directory
/// is always configured because it doubles as the fallback destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Store records in an S3-compatible bucket instead of local files
    #[serde(default)]
    pub use_remote: bool,

    /// Bucket name; required for the remote backend to come up
    #[serde(default)]
    pub bucket: Option<String>,

    /// Bucket region (default: us-east-1)
    #[serde(default = "default_region")]
    pub region: String,

    /// Custom endpoint for S3-compatible stores (MinIO, ...)
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Directory for local records, and the fallback destination
    #[serde(default = "default_local_dir")]
    pub local_dir: PathBuf,

    /// Freshness window in days, applied by readers rather than storage
    #[serde(default = "default_ttl_days")]
    pub ttl_days: u32,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_local_dir() -> PathBuf {
    PathBuf::from("data/assessment_cache")
}

const fn default_ttl_days() -> u32 {
    7
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            use_remote: false,
            bucket: None,
            region: default_region(),
            endpoint: None,
            local_dir: default_local_dir(),
            ttl_days: default_ttl_days(),
        }
    }
}
