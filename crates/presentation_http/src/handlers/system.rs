//! System introspection handlers

use application::ports::StorageInfo;
use axum::extract::State;
use axum::Json;
use domain::taxonomy::{TaxonomyCategory, TAXONOMY};
use serde::Serialize;

use crate::state::AppState;

/// Taxonomy listing response
#[derive(Debug, Serialize)]
pub struct TaxonomyResponse {
    pub categories: &'static [TaxonomyCategory],
}

/// List the classification taxonomy
pub async fn taxonomy() -> Json<TaxonomyResponse> {
    Json(TaxonomyResponse {
        categories: TAXONOMY,
    })
}

/// System status response
#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub model: String,
    pub ttl_days: u32,
    pub storage: StorageInfo,
}

/// Report version, model, and storage diagnostics
pub async fn status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.service.current_model(),
        ttl_days: state.service.ttl_days(),
        storage: state.service.storage_info(),
    })
}
