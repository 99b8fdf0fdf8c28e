//! Assessment handlers

use application::{AssessmentOutcome, ComparisonOutcome};
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for an assessment
#[derive(Debug, Deserialize)]
pub struct AssessRequest {
    /// Product name, vendor name, or URL to assess
    pub target: String,

    /// Skip the cache and assess fresh
    #[serde(default)]
    pub force_refresh: bool,
}

/// Run the assessment pipeline for one target
pub async fn assess(
    State(state): State<AppState>,
    Json(request): Json<AssessRequest>,
) -> Result<Json<AssessmentOutcome>, ApiError> {
    let target = request.target.trim();
    if target.is_empty() {
        return Err(ApiError::BadRequest("target must not be empty".to_string()));
    }

    let outcome = state.service.assess(target, request.force_refresh).await?;
    Ok(Json(outcome))
}

/// Request body for a comparison
#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub target_a: String,
    pub target_b: String,
}

/// Assess two targets and compare them side by side
pub async fn compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Result<Json<ComparisonOutcome>, ApiError> {
    let first = request.target_a.trim();
    let second = request.target_b.trim();
    if first.is_empty() || second.is_empty() {
        return Err(ApiError::BadRequest(
            "both comparison targets must be non-empty".to_string(),
        ));
    }

    let outcome = state.service.compare(first, second).await?;
    Ok(Json(outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assess_request_defaults_force_refresh_off() {
        let request: AssessRequest = serde_json::from_str(r#"{"target": "slack"}"#).unwrap();
        assert_eq!(request.target, "slack");
        assert!(!request.force_refresh);
    }

    #[test]
    fn compare_request_requires_both_targets() {
        let result: Result<CompareRequest, _> =
            serde_json::from_str(r#"{"target_a": "slack"}"#);
        assert!(result.is_err());
    }
}
