//! Prober configuration

use serde::{Deserialize, Serialize};

/// Configuration for vendor document probing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Per-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,

    /// User agent sent with probe requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Characters of page content kept for prompt context (default: 5000)
    #[serde(default = "default_max_content_len")]
    pub max_content_len: usize,

    /// Minimum content length for a page to count as found (default: 500)
    #[serde(default = "default_min_content_len")]
    pub min_content_len: usize,
}

const fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    "SoftVet/0.3 (Research Tool)".to_string()
}

const fn default_max_content_len() -> usize {
    5000
}

const fn default_min_content_len() -> usize {
    500
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
            max_content_len: default_max_content_len(),
            min_content_len: default_min_content_len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = SourcesConfig::default();
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.max_content_len, 5000);
        assert_eq!(config.min_content_len, 500);
        assert!(config.user_agent.contains("SoftVet"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: SourcesConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.min_content_len, 500);
    }
}
