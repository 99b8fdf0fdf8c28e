//! CISA Known Exploited Vulnerabilities catalog integration
//!
//! Fetches the public KEV feed and matches entries against a vendor and
//! product name. A KEV hit is a strong independent risk signal for an
//! assessment.

mod client;
mod models;

pub use client::{KevClient, KevConfig, KevError, KevFeed};
pub use models::{KevCatalog, KevVulnerability};
