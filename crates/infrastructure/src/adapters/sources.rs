//! Vendor source adapter - Implements SourceProbePort using integration_sources

use std::collections::BTreeMap;

use application::error::ApplicationError;
use application::ports::SourceProbePort;
use async_trait::async_trait;
use domain::{SourceDocument, SourceKind};
use integration_sources::{HttpSourceProber, SourceProber, SourcesConfig};

/// Adapter for vendor security document probing
#[derive(Debug)]
pub struct VendorSourceAdapter {
    prober: HttpSourceProber,
}

impl VendorSourceAdapter {
    /// Create a new adapter with default configuration
    pub fn new() -> Result<Self, ApplicationError> {
        let prober = HttpSourceProber::with_defaults()
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { prober })
    }

    /// Create with custom configuration
    pub fn with_config(config: SourcesConfig) -> Result<Self, ApplicationError> {
        let prober = HttpSourceProber::new(config)
            .map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { prober })
    }
}

#[async_trait]
impl SourceProbePort for VendorSourceAdapter {
    async fn probe(&self, origin: &str) -> BTreeMap<SourceKind, SourceDocument> {
        self.prober.probe_all(origin).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_construction_succeeds_with_defaults() {
        assert!(VendorSourceAdapter::new().is_ok());
    }

    #[test]
    fn adapter_construction_succeeds_with_custom_config() {
        let config = SourcesConfig {
            request_timeout_secs: 5,
            ..SourcesConfig::default()
        };
        assert!(VendorSourceAdapter::with_config(config).is_ok());
    }
}
