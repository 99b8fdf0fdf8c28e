//! HTTP prober for vendor documents

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use domain::{SourceDocument, SourceKind};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::SourcesConfig;
use crate::patterns::{candidate_paths, classify_source};

/// Errors constructing the prober
///
/// Probing itself never fails - an unreachable or useless candidate URL is
/// simply not a find.
#[derive(Debug, Error)]
pub enum SourceProbeError {
    /// HTTP client could not be initialized
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
}

/// Port for vendor document probing
#[async_trait]
pub trait SourceProber: Send + Sync {
    /// Probe all document kinds for a vendor origin (scheme + host)
    ///
    /// Returns an entry for every kind; kinds with no usable candidate map
    /// to a missing document.
    async fn probe_all(&self, origin: &str) -> BTreeMap<SourceKind, SourceDocument>;
}

/// Reqwest-based prober
#[derive(Debug)]
pub struct HttpSourceProber {
    client: Client,
    config: SourcesConfig,
}

impl HttpSourceProber {
    /// Create a new prober with the given configuration
    pub fn new(config: SourcesConfig) -> Result<Self, SourceProbeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SourceProbeError::ConnectionFailed(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create a prober with default configuration
    pub fn with_defaults() -> Result<Self, SourceProbeError> {
        Self::new(SourcesConfig::default())
    }

    /// Whether fetched content is substantial enough to count as a find
    ///
    /// Filters empty shells and soft-404 pages that answer 200 with an
    /// error body.
    fn is_usable(&self, body: &str) -> bool {
        if body.len() <= self.config.min_content_len {
            return false;
        }
        let head: String = body.chars().take(1000).collect();
        !head.to_lowercase().contains("404")
    }

    /// Fetch one candidate URL, returning its body on success
    async fn fetch_candidate(&self, url: &str) -> Option<String> {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url = %url, error = %e, "Candidate fetch failed");
                return None;
            },
        };

        if !response.status().is_success() {
            debug!(url = %url, status = %response.status(), "Candidate answered non-success");
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                debug!(url = %url, error = %e, "Candidate body read failed");
                None
            },
        }
    }

    /// Probe the candidates for one document kind
    async fn probe_kind(&self, origin: &str, kind: SourceKind) -> SourceDocument {
        for path in candidate_paths(kind) {
            let url = format!("{}{path}", origin.trim_end_matches('/'));
            debug!(kind = %kind, url = %url, "Trying candidate");

            if let Some(body) = self.fetch_candidate(&url).await {
                if self.is_usable(&body) {
                    debug!(kind = %kind, url = %url, "Found source");
                    let content = truncate_chars(body, self.config.max_content_len);
                    return SourceDocument::located(url.clone(), content, classify_source(&url));
                }
            }
        }
        SourceDocument::missing()
    }
}

/// Truncate a string to at most `max` characters, respecting char
/// boundaries
fn truncate_chars(mut s: String, max: usize) -> String {
    if let Some((idx, _)) = s.char_indices().nth(max) {
        s.truncate(idx);
    }
    s
}

#[async_trait]
impl SourceProber for HttpSourceProber {
    #[instrument(skip(self), fields(origin = %origin))]
    async fn probe_all(&self, origin: &str) -> BTreeMap<SourceKind, SourceDocument> {
        let mut sources = BTreeMap::new();
        for kind in SourceKind::ALL {
            let document = self.probe_kind(origin, kind).await;
            sources.insert(kind, document);
        }
        sources
    }
}
