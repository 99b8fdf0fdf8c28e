//! Integration tests for the Gemini client using wiremock
//!
//! These tests verify request construction and response handling against a
//! mock HTTP server.

use ai_core::{GeminiClient, InferenceConfig, InferenceEngine, InferenceError, InferenceRequest};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_response() -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{"text": "{\"product_name\": \"Slack\", \"confidence\": 0.9}"}]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 42,
            "candidatesTokenCount": 17,
            "totalTokenCount": 59
        },
        "modelVersion": "gemini-2.0-flash"
    })
}

fn create_test_client(mock_server: &MockServer) -> GeminiClient {
    let config = InferenceConfig {
        base_url: mock_server.uri(),
        api_key: Some("test-key".to_string()),
        timeout_ms: 5_000,
        ..Default::default()
    };
    #[allow(clippy::expect_used)]
    GeminiClient::new(config).expect("Failed to create client")
}

#[tokio::test]
async fn generate_parses_a_successful_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client
        .generate(InferenceRequest::simple("Identify Slack"))
        .await
        .unwrap();

    assert!(response.content.contains("Slack"));
    assert_eq!(response.model, "gemini-2.0-flash");
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    let usage = response.usage.unwrap();
    assert_eq!(usage.prompt_tokens, 42);
    assert_eq!(usage.total_tokens, 59);
}

#[tokio::test]
async fn generate_sends_system_instruction_when_present() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(body_partial_json(serde_json::json!({
            "system_instruction": {"parts": [{"text": "You are a classifier"}]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_response()))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client
        .generate(InferenceRequest::with_system(
            "You are a classifier",
            "Classify this",
        ))
        .await;

    assert!(result.is_ok(), "expected success, got {result:?}");
}

#[tokio::test]
async fn generate_joins_multiple_parts() {
    let mock_server = MockServer::start().await;

    let body = serde_json::json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": " 1}"}]}
        }]
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let response = client.generate(InferenceRequest::simple("x")).await.unwrap();
    assert_eq!(response.content, "{\"a\": 1}");
}

#[tokio::test]
async fn generate_maps_rate_limiting() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.generate(InferenceRequest::simple("x")).await;
    assert!(matches!(result, Err(InferenceError::RateLimited)));
}

#[tokio::test]
async fn generate_maps_server_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.generate(InferenceRequest::simple("x")).await;
    match result {
        Err(InferenceError::ServerError(message)) => {
            assert!(message.contains("backend exploded"));
        },
        other => panic!("expected ServerError, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_rejects_empty_candidate_lists() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let result = client.generate(InferenceRequest::simple("x")).await;
    assert!(matches!(result, Err(InferenceError::InvalidResponse(_))));
}

#[tokio::test]
async fn health_check_succeeds_when_models_endpoint_answers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"models": []})))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(client.health_check().await.unwrap());
}

#[tokio::test]
async fn health_check_fails_on_auth_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/models"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(!client.health_check().await.unwrap());
}
