//! Cache record entity
//!
//! The unit of persistence for the assessment cache: an opaque JSON object
//! supplied by the caller plus a `cached_at` timestamp stamped by the cache
//! layer at write time. Staleness is judged by the reader, not enforced by
//! storage.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::DomainError;

/// A cached JSON document with its write timestamp
///
/// The document schema is caller-defined; the only guaranteed field in the
/// persisted JSON is `cached_at` (RFC 3339). Any `cached_at` present in the
/// caller's document is discarded when stamping - the timestamp is owned by
/// the cache layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// When the record was written, set by the cache manager
    pub cached_at: DateTime<Utc>,

    /// Caller-defined payload, stored alongside the timestamp
    #[serde(flatten)]
    pub document: Map<String, Value>,
}

impl CacheRecord {
    /// Stamp a caller document into a record at the given instant
    ///
    /// The document must be a JSON object. A caller-supplied `cached_at`
    /// field is removed and replaced by `now`.
    pub fn stamp(document: Value, now: DateTime<Utc>) -> Result<Self, DomainError> {
        let Value::Object(mut fields) = document else {
            return Err(DomainError::InvalidDocument(
                "cache records must be JSON objects".to_string(),
            ));
        };
        fields.remove("cached_at");
        Ok(Self {
            cached_at: now,
            document: fields,
        })
    }

    /// Age of the record relative to `now`
    #[must_use]
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.cached_at
    }

    /// Age of the record in whole days relative to `now`
    #[must_use]
    pub fn age_days(&self, now: DateTime<Utc>) -> i64 {
        self.age(now).num_days()
    }

    /// Whether the record is older than the caller's freshness window
    ///
    /// A record is usable while `now - cached_at` is at most `ttl_days`.
    #[must_use]
    pub fn is_stale(&self, ttl_days: u32, now: DateTime<Utc>) -> bool {
        self.age(now) > Duration::days(i64::from(ttl_days))
    }

    /// Consume the record, returning the payload without the timestamp
    #[must_use]
    pub fn into_document(self) -> Map<String, Value> {
        self.document
    }
}
