//! Gemini API client implementation

mod client;

pub use client::GeminiClient;
