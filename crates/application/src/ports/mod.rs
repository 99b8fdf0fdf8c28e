//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems. Adapters in the infrastructure layer implement these
//! ports.

mod assessment_store;
mod inference_port;
mod kev_port;
mod source_probe_port;

pub use assessment_store::{
    AssessmentStorePort, AssessmentStoreExt, BackendKind, StorageError, StorageInfo,
};
pub use inference_port::{InferencePort, InferenceResult};
pub use kev_port::KevCatalogPort;
pub use source_probe_port::SourceProbePort;
