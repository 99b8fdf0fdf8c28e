//! KEV adapter - Implements KevCatalogPort using integration_kev
//!
//! The port promises findings rather than a fallible result: a feed that
//! cannot be fetched degrades to `unavailable` findings so the assessment
//! pipeline keeps moving.

use application::error::ApplicationError;
use application::ports::KevCatalogPort;
use async_trait::async_trait;
use domain::KevFindings;
use integration_kev::{KevClient, KevConfig, KevFeed};
use tracing::warn;

/// Adapter for KEV catalog lookups
#[derive(Debug)]
pub struct KevCatalogAdapter {
    client: KevClient,
}

impl KevCatalogAdapter {
    /// Create a new adapter with default configuration
    pub fn new() -> Result<Self, ApplicationError> {
        let client = KevClient::with_defaults()
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Create with custom configuration
    pub fn with_config(config: KevConfig) -> Result<Self, ApplicationError> {
        let client =
            KevClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl KevCatalogPort for KevCatalogAdapter {
    async fn check(&self, vendor_name: &str, product_name: &str) -> KevFindings {
        match self.client.check(vendor_name, product_name).await {
            Ok(findings) => findings,
            Err(e) => {
                warn!(error = %e, "KEV catalog check failed");
                KevFindings::unavailable(format!("KEV catalog unavailable: {e}"))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_construction_succeeds_with_defaults() {
        assert!(KevCatalogAdapter::new().is_ok());
    }

    #[test]
    fn adapter_construction_succeeds_with_custom_config() {
        let config = KevConfig {
            timeout_secs: 3,
            ..KevConfig::default()
        };
        assert!(KevCatalogAdapter::with_config(config).is_ok());
    }
}
