//! Vendor security document probing
//!
//! Given a vendor's web origin, tries a short list of well-known URL paths
//! per document kind (security page, terms of service, privacy policy,
//! PSIRT page) and keeps the first candidate that answers with real
//! content. Individual fetch failures are "not found" outcomes, never
//! errors.

mod config;
mod patterns;
mod prober;

pub use config::SourcesConfig;
pub use patterns::{candidate_paths, classify_source, INDEPENDENT_HOSTS};
pub use prober::{HttpSourceProber, SourceProbeError, SourceProber};
