//! Gemini adapter - Implements InferencePort using ai_core

use std::time::Instant;

use ai_core::{GeminiClient, InferenceConfig, InferenceEngine, InferenceError, InferenceRequest};
use application::error::ApplicationError;
use application::ports::{InferencePort, InferenceResult};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Adapter for LLM inference through the Gemini API
pub struct GeminiInferenceAdapter {
    client: GeminiClient,
}

impl std::fmt::Debug for GeminiInferenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiInferenceAdapter")
            .field("model", &self.client.default_model())
            .finish_non_exhaustive()
    }
}

impl GeminiInferenceAdapter {
    /// Create a new adapter with the given configuration
    pub fn new(config: InferenceConfig) -> Result<Self, ApplicationError> {
        let client =
            GeminiClient::new(config).map_err(|e| ApplicationError::Internal(e.to_string()))?;
        Ok(Self { client })
    }

    /// Map an inference error to an application error
    fn map_error(err: InferenceError) -> ApplicationError {
        match err {
            InferenceError::MissingApiKey => {
                ApplicationError::Configuration(err.to_string())
            },
            other => ApplicationError::Inference(other.to_string()),
        }
    }

    async fn run(&self, request: InferenceRequest) -> Result<InferenceResult, ApplicationError> {
        let started = Instant::now();
        let response = self
            .client
            .generate(request)
            .await
            .map_err(Self::map_error)?;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        debug!(
            model = %response.model,
            latency_ms,
            tokens = ?response.usage.as_ref().map(|u| u.total_tokens),
            "Inference call completed"
        );

        Ok(InferenceResult {
            content: response.content,
            model: response.model,
            tokens_used: response.usage.map(|u| u.total_tokens),
            latency_ms,
        })
    }
}

#[async_trait]
impl InferencePort for GeminiInferenceAdapter {
    #[instrument(skip(self, prompt))]
    async fn generate(&self, prompt: &str) -> Result<InferenceResult, ApplicationError> {
        self.run(InferenceRequest::simple(prompt)).await
    }

    #[instrument(skip(self, system_prompt, prompt))]
    async fn generate_with_system(
        &self,
        system_prompt: &str,
        prompt: &str,
    ) -> Result<InferenceResult, ApplicationError> {
        self.run(InferenceRequest::with_system(system_prompt, prompt))
            .await
    }

    async fn is_healthy(&self) -> bool {
        self.client.health_check().await.unwrap_or(false)
    }

    fn current_model(&self) -> String {
        self.client.default_model().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_maps_to_configuration_error() {
        let err = GeminiInferenceAdapter::map_error(InferenceError::MissingApiKey);
        assert!(matches!(err, ApplicationError::Configuration(_)));
    }

    #[test]
    fn transport_failures_map_to_inference_errors() {
        let err = GeminiInferenceAdapter::map_error(InferenceError::ConnectionFailed(
            "refused".to_string(),
        ));
        assert!(matches!(err, ApplicationError::Inference(_)));
        assert!(err.to_string().contains("refused"));
    }

    #[test]
    fn adapter_reports_the_configured_model() {
        let adapter = GeminiInferenceAdapter::new(InferenceConfig::default()).unwrap();
        assert_eq!(adapter.current_model(), "gemini-2.0-flash");
    }
}
