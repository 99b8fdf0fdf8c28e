//! Port definitions for the inference engine

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// Request for inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceRequest {
    /// Optional system instruction
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// User prompt
    pub prompt: String,

    /// Temperature override for this request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Token limit override for this request
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl InferenceRequest {
    /// Create a plain single-prompt request
    pub fn simple(prompt: impl Into<String>) -> Self {
        Self {
            system: None,
            prompt: prompt.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Create a request with a system instruction
    pub fn with_system(system: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            prompt: prompt.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    /// Set the temperature for this request
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Response from inference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InferenceResponse {
    /// Generated content
    pub content: String,
    /// Model that generated the response
    pub model: String,
    /// Token usage statistics
    pub usage: Option<TokenUsage>,
    /// Finish reason reported by the API
    pub finish_reason: Option<String>,
}

/// Token usage statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Port for inference engine implementations
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Generate a complete response
    async fn generate(
        &self,
        request: InferenceRequest,
    ) -> Result<InferenceResponse, InferenceError>;

    /// Check if the inference API is reachable and authorized
    async fn health_check(&self) -> Result<bool, InferenceError>;

    /// Get the configured model name
    fn default_model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_request_has_no_system() {
        let req = InferenceRequest::simple("Identify this product");
        assert!(req.system.is_none());
        assert_eq!(req.prompt, "Identify this product");
    }

    #[test]
    fn with_system_sets_both_parts() {
        let req = InferenceRequest::with_system("You are a security analyst", "Classify this");
        assert_eq!(req.system.as_deref(), Some("You are a security analyst"));
        assert_eq!(req.prompt, "Classify this");
    }

    #[test]
    fn with_temperature_chains() {
        let req = InferenceRequest::simple("x").with_temperature(0.1);
        assert_eq!(req.temperature, Some(0.1));
    }

    #[test]
    fn request_skips_none_fields_in_json() {
        let req = InferenceRequest::simple("x");
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("system"));
        assert!(!json.contains("temperature"));
    }

    #[test]
    fn response_round_trips() {
        let resp = InferenceResponse {
            content: "result".to_string(),
            model: "gemini-2.0-flash".to_string(),
            usage: Some(TokenUsage {
                prompt_tokens: 10,
                completion_tokens: 5,
                total_tokens: 15,
            }),
            finish_reason: Some("STOP".to_string()),
        };
        let json = serde_json::to_string(&resp).unwrap();
        let back: InferenceResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.content, "result");
        assert_eq!(back.usage.unwrap().total_tokens, 15);
    }
}
