//! Evidence gathering settings
//!
//! One config section covers both external evidence feeds: vendor document
//! probing and the KEV catalog. Conversion methods produce the per-client
//! configs the integration crates consume.

use integration_kev::KevConfig;
use integration_sources::SourcesConfig;
use serde::{Deserialize, Serialize};

/// Configuration for vendor document probing and the KEV feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Per-request timeout for vendor document fetches, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Timeout for fetching the KEV feed, in seconds
    #[serde(default = "default_kev_timeout")]
    pub kev_timeout_secs: u64,

    /// KEV feed URL (default: the published CISA feed)
    #[serde(default = "default_kev_url")]
    pub kev_url: String,

    /// User agent sent with outbound evidence requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Characters of page content kept for prompt context
    #[serde(default = "default_max_content_len")]
    pub max_content_len: usize,
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_kev_timeout() -> u64 {
    15
}

fn default_kev_url() -> String {
    "https://www.cisa.gov/sites/default/files/feeds/known_exploited_vulnerabilities.json"
        .to_string()
}

fn default_user_agent() -> String {
    "SoftVet/0.3 (Research Tool)".to_string()
}

const fn default_max_content_len() -> usize {
    5000
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout(),
            kev_timeout_secs: default_kev_timeout(),
            kev_url: default_kev_url(),
            user_agent: default_user_agent(),
            max_content_len: default_max_content_len(),
        }
    }
}

impl SourceSettings {
    /// Configuration for the vendor document prober
    #[must_use]
    pub fn probe_config(&self) -> SourcesConfig {
        SourcesConfig {
            request_timeout_secs: self.request_timeout_secs,
            user_agent: self.user_agent.clone(),
            max_content_len: self.max_content_len,
            ..SourcesConfig::default()
        }
    }

    /// Configuration for the KEV feed client
    #[must_use]
    pub fn kev_config(&self) -> KevConfig {
        KevConfig {
            feed_url: self.kev_url.clone(),
            timeout_secs: self.kev_timeout_secs,
            user_agent: self.user_agent.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let settings = SourceSettings::default();
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.kev_timeout_secs, 15);
        assert!(settings.kev_url.contains("cisa.gov"));
        assert_eq!(settings.max_content_len, 5000);
    }

    #[test]
    fn probe_config_carries_shared_fields() {
        let settings = SourceSettings {
            request_timeout_secs: 10,
            max_content_len: 2000,
            ..SourceSettings::default()
        };
        let config = settings.probe_config();
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.max_content_len, 2000);
        assert_eq!(config.user_agent, settings.user_agent);
    }

    #[test]
    fn kev_config_carries_feed_url_and_timeout() {
        let settings = SourceSettings {
            kev_url: "http://localhost:8099/kev.json".to_string(),
            kev_timeout_secs: 5,
            ..SourceSettings::default()
        };
        let config = settings.kev_config();
        assert_eq!(config.feed_url, "http://localhost:8099/kev.json");
        assert_eq!(config.timeout_secs, 5);
    }
}
