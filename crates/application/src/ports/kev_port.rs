//! KEV catalog port - Interface for exploited-vulnerability lookups

use async_trait::async_trait;
use domain::KevFindings;

/// Port for checking the Known Exploited Vulnerabilities catalog
///
/// Feed unavailability is reported inside the findings (as an
/// `unavailable` note), keeping the assessment pipeline running.
#[async_trait]
pub trait KevCatalogPort: Send + Sync {
    /// Check the catalog for entries matching a vendor or product
    async fn check(&self, vendor_name: &str, product_name: &str) -> KevFindings;
}
