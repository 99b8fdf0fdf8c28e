//! Cache administration handlers

use application::CacheListing;
use axum::extract::{Path, Query, State};
use axum::Json;
use domain::{CacheKey, CacheRecord};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Cache listing response
#[derive(Debug, Serialize)]
pub struct CacheListResponse {
    pub count: usize,
    pub ttl_days: u32,
    pub entries: Vec<CacheListing>,
}

/// List cached assessments with their age and staleness
pub async fn list_entries(
    State(state): State<AppState>,
) -> Result<Json<CacheListResponse>, ApiError> {
    let entries = state.service.list_cached().await?;
    Ok(Json(CacheListResponse {
        count: entries.len(),
        ttl_days: state.service.ttl_days(),
        entries,
    }))
}

fn parse_key(raw: &str) -> Result<CacheKey, ApiError> {
    CacheKey::parse(raw).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Fetch the raw cached record for a key
pub async fn get_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CacheRecord>, ApiError> {
    let key = parse_key(&key)?;
    let record = state
        .service
        .cached_record(&key)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no cached assessment for key {key}")))?;
    Ok(Json(record))
}

/// Deletion response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub key: CacheKey,
    pub deleted: bool,
}

/// Delete one cached assessment
pub async fn delete_entry(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let key = parse_key(&key)?;
    let deleted = state.service.delete_cached(&key).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!(
            "no cached assessment for key {key}"
        )));
    }
    Ok(Json(DeleteResponse { key, deleted }))
}

/// Query parameters guarding the clear operation
#[derive(Debug, Deserialize)]
pub struct ClearParams {
    #[serde(default)]
    pub confirm: bool,
}

/// Clear response
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub cleared: u64,
}

/// Delete every cached assessment
///
/// Requires `?confirm=true`; clearing the whole cache by accident is too
/// easy otherwise.
pub async fn clear(
    State(state): State<AppState>,
    Query(params): Query<ClearParams>,
) -> Result<Json<ClearResponse>, ApiError> {
    if !params.confirm {
        return Err(ApiError::BadRequest(
            "pass confirm=true to clear the entire cache".to_string(),
        ));
    }

    let cleared = state.service.clear_cache().await?;
    Ok(Json(ClearResponse { cleared }))
}
