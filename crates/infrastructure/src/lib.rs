//! Infrastructure layer - Adapters, configuration, and storage
//!
//! Implements the application-layer ports: the persistent assessment cache
//! (local filesystem or S3-compatible object store behind one manager),
//! the Gemini inference adapter, and the evidence-gathering adapters.

pub mod adapters;
pub mod config;
pub mod storage;
pub mod telemetry;

pub use adapters::{GeminiInferenceAdapter, KevCatalogAdapter, VendorSourceAdapter};
pub use config::{AppConfig, ServerConfig, SourceSettings, StorageSettings};
pub use storage::{CacheManager, LocalStore, S3Store};
