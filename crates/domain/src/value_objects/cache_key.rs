//! Cache key value object
//!
//! A `CacheKey` identifies one cached assessment. It is derived
//! deterministically from the user's free-form input, so the same product
//! name always maps to the same stored record regardless of casing or
//! surrounding whitespace.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::DomainError;

/// A deterministic, fixed-length identifier for a cached assessment
///
/// Always exactly 16 lowercase hexadecimal characters: the truncated
/// SHA-256 digest of the normalized (trimmed, lower-cased) input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CacheKey(String);

impl CacheKey {
    /// Length of a cache key in hex characters
    pub const LEN: usize = 16;

    /// Derive a cache key from free-form input
    ///
    /// Normalization lower-cases the input and strips leading/trailing
    /// whitespace before hashing, so `"Slack"`, `"slack"` and `" slack "`
    /// all yield the same key. The empty string is valid input.
    #[must_use]
    pub fn derive(input: &str) -> Self {
        let normalized = input.trim().to_lowercase();
        let digest = Sha256::digest(normalized.as_bytes());
        let mut encoded = hex::encode(digest);
        encoded.truncate(Self::LEN);
        Self(encoded)
    }

    /// Parse an existing key string, validating its shape
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let valid = s.len() == Self::LEN && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(DomainError::InvalidCacheKey(s.to_string()))
        }
    }

    /// The key as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CacheKey {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<CacheKey> for String {
    fn from(key: CacheKey) -> Self {
        key.0
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn derive_is_deterministic() {
        assert_eq!(CacheKey::derive("Slack"), CacheKey::derive("Slack"));
    }

    #[test]
    fn derive_is_case_insensitive() {
        assert_eq!(CacheKey::derive("slack"), CacheKey::derive("SLACK"));
        assert_eq!(CacheKey::derive("GitHub"), CacheKey::derive("github"));
    }

    #[test]
    fn derive_strips_surrounding_whitespace() {
        assert_eq!(CacheKey::derive("slack"), CacheKey::derive("  slack  "));
        assert_eq!(CacheKey::derive("slack"), CacheKey::derive("\tslack\n"));
    }

    #[test]
    fn derive_distinguishes_different_inputs() {
        assert_ne!(CacheKey::derive("slack"), CacheKey::derive("zoom"));
    }

    #[test]
    fn derived_key_has_expected_shape() {
        let key = CacheKey::derive("example input");
        assert_eq!(key.as_str().len(), CacheKey::LEN);
        assert!(key.as_str().bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
    }

    #[test]
    fn empty_input_is_valid() {
        let key = CacheKey::derive("");
        assert_eq!(key.as_str().len(), CacheKey::LEN);
        // Whitespace-only input normalizes to the empty string
        assert_eq!(key, CacheKey::derive("   "));
    }

    #[test]
    fn parse_accepts_derived_keys() {
        let key = CacheKey::derive("slack");
        let parsed = CacheKey::parse(key.as_str()).unwrap();
        assert_eq!(key, parsed);
    }

    #[test]
    fn parse_rejects_wrong_length() {
        assert!(CacheKey::parse("abc123").is_err());
        assert!(CacheKey::parse("0123456789abcdef0").is_err());
    }

    #[test]
    fn parse_rejects_non_hex_and_uppercase() {
        assert!(CacheKey::parse("0123456789abcdeg").is_err());
        assert!(CacheKey::parse("0123456789ABCDEF").is_err());
    }

    #[test]
    fn display_matches_as_str() {
        let key = CacheKey::derive("slack");
        assert_eq!(key.to_string(), key.as_str());
    }

    #[test]
    fn serde_round_trip() {
        let key = CacheKey::derive("slack");
        let json = serde_json::to_string(&key).unwrap();
        let back: CacheKey = serde_json::from_str(&json).unwrap();
        assert_eq!(key, back);
    }

    #[test]
    fn deserialize_rejects_invalid_shape() {
        let result: Result<CacheKey, _> = serde_json::from_str("\"not a key\"");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn derive_normalization_invariants(input in "[ -~]*") {
            let key = CacheKey::derive(&input);
            prop_assert_eq!(key.clone(), CacheKey::derive(&input.to_uppercase()));
            prop_assert_eq!(key.clone(), CacheKey::derive(&format!("  {input}  ")));
            prop_assert_eq!(key.as_str().len(), CacheKey::LEN);
        }

        #[test]
        fn distinct_normalized_inputs_yield_distinct_keys(a in "[a-z]{1,32}", b in "[a-z]{1,32}") {
            prop_assume!(a != b);
            prop_assert_ne!(CacheKey::derive(&a), CacheKey::derive(&b));
        }
    }
}
