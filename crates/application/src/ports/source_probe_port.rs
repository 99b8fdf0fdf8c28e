//! Source probe port - Interface for vendor document discovery

use std::collections::BTreeMap;

use async_trait::async_trait;
use domain::{SourceDocument, SourceKind};

/// Port for probing a vendor's well-known security documents
///
/// Probing is best-effort by contract: unreachable or useless candidate
/// URLs become missing documents, never errors.
#[async_trait]
pub trait SourceProbePort: Send + Sync {
    /// Probe all document kinds for a vendor origin (scheme + host)
    async fn probe(&self, origin: &str) -> BTreeMap<SourceKind, SourceDocument>;
}
