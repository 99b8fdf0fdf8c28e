//! Application layer - Use cases and orchestration
//!
//! Contains the assessment pipeline, prompt construction, and the port
//! definitions implemented by infrastructure adapters.

pub mod error;
pub mod ports;
pub mod prompts;
pub mod services;
pub mod target;

pub use error::ApplicationError;
pub use ports::*;
pub use services::*;
pub use target::extract_domain;
