//! Route definitions

use axum::routing::{get, post};
use axum::Router;

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health and readiness
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        // Assessment API (v1)
        .route("/v1/assess", post(handlers::assess::assess))
        .route("/v1/compare", post(handlers::assess::compare))
        // Cache administration
        .route(
            "/v1/cache",
            get(handlers::cache::list_entries).delete(handlers::cache::clear),
        )
        .route(
            "/v1/cache/{key}",
            get(handlers::cache::get_entry).delete(handlers::cache::delete_entry),
        )
        // Taxonomy and system introspection
        .route("/v1/taxonomy", get(handlers::system::taxonomy))
        .route("/v1/system/status", get(handlers::system::status))
        // Attach state
        .with_state(state)
}
