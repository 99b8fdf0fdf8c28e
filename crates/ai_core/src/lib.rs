//! AI core - Language model inference
//!
//! Defines the inference port and the Gemini `generateContent` client used
//! for entity resolution, taxonomy classification, and alternative
//! suggestions.

pub mod config;
pub mod error;
mod gemini;
pub mod ports;

pub use config::InferenceConfig;
pub use error::InferenceError;
pub use gemini::GeminiClient;
pub use ports::{InferenceEngine, InferenceRequest, InferenceResponse, TokenUsage};
