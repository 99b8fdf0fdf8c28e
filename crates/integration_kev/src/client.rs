//! KEV feed client

use std::time::Duration;

use async_trait::async_trait;
use domain::{KevFindings, KevMatch};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::models::KevCatalog;

/// KEV client errors
#[derive(Debug, Error)]
pub enum KevError {
    /// Connection to the feed host failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request for the feed failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Feed content could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Feed host answered with a server error
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Timed out fetching the feed
    #[error("Timed out fetching KEV feed")]
    Timeout,
}

impl From<reqwest::Error> for KevError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

/// KEV feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KevConfig {
    /// Feed URL (default: the published CISA feed)
    #[serde(default = "default_feed_url")]
    pub feed_url: String,

    /// Fetch timeout in seconds (default: 15)
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// User agent sent with feed requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_feed_url() -> String {
    "https://www.cisa.gov/sites/default/files/feeds/known_exploited_vulnerabilities.json"
        .to_string()
}

const fn default_timeout() -> u64 {
    15
}

fn default_user_agent() -> String {
    "SoftVet/0.3 (Research Tool)".to_string()
}

impl Default for KevConfig {
    fn default() -> Self {
        Self {
            feed_url: default_feed_url(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Port for KEV catalog lookups
#[async_trait]
pub trait KevFeed: Send + Sync {
    /// Check the catalog for entries matching a vendor or product
    async fn check(&self, vendor_name: &str, product_name: &str)
    -> Result<KevFindings, KevError>;
}

/// HTTP client for the published KEV feed
#[derive(Debug)]
pub struct KevClient {
    client: Client,
    config: KevConfig,
}

impl KevClient {
    /// Create a new KEV client with the given configuration
    pub fn new(config: KevConfig) -> Result<Self, KevError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| KevError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a client with default configuration
    pub fn with_defaults() -> Result<Self, KevError> {
        Self::new(KevConfig::default())
    }

    async fn fetch_catalog(&self) -> Result<KevCatalog, KevError> {
        debug!(url = %self.config.feed_url, "Fetching KEV catalog");

        let response = self.client.get(&self.config.feed_url).send().await?;

        let status = response.status();
        if status.is_server_error() {
            return Err(KevError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(KevError::RequestFailed(format!("HTTP {status}")));
        }

        response
            .json::<KevCatalog>()
            .await
            .map_err(|e| KevError::ParseError(e.to_string()))
    }
}

#[async_trait]
impl KevFeed for KevClient {
    #[instrument(skip(self), fields(vendor = %vendor_name, product = %product_name))]
    async fn check(
        &self,
        vendor_name: &str,
        product_name: &str,
    ) -> Result<KevFindings, KevError> {
        let catalog = self.fetch_catalog().await?;

        let matches: Vec<KevMatch> = catalog
            .vulnerabilities
            .iter()
            .filter(|v| v.matches(vendor_name, product_name))
            .map(KevMatch::from)
            .collect();

        if matches.is_empty() {
            debug!("No KEV entries matched");
            Ok(KevFindings::clean())
        } else {
            warn!(count = matches.len(), "Product appears in the KEV catalog");
            Ok(KevFindings::exploited(matches))
        }
    }
}
