//! SoftVet HTTP Server
//!
//! Main entry point for the HTTP API server.

use std::sync::Arc;
use std::time::Duration;

use application::AssessmentService;
use infrastructure::{
    telemetry, AppConfig, CacheManager, GeminiInferenceAdapter, KevCatalogAdapter,
    VendorSourceAdapter,
};
use presentation_http::{create_router, AppState};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init_tracing("softvet_server=info,presentation_http=info,tower_http=info");

    info!("SoftVet v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {e}");
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = config.server.port,
        model = %config.inference.model,
        "Configuration loaded"
    );

    // Wire the pipeline: inference, evidence gathering, cache
    let inference = GeminiInferenceAdapter::new(config.inference.clone())?;
    let sources = VendorSourceAdapter::with_config(config.sources.probe_config())?;
    let kev = KevCatalogAdapter::with_config(config.sources.kev_config())?;
    let store = CacheManager::from_settings(&config.storage);

    let info = store.storage_info();
    info!(backend = %info.backend, location = %info.location, "Cache storage ready");

    let service = AssessmentService::new(
        Arc::new(inference),
        Arc::new(sources),
        Arc::new(kev),
        Arc::new(store),
        config.storage.ttl_days,
    );

    let state = AppState::new(Arc::new(service));

    let cors_layer = if config.server.allowed_origins.is_empty() {
        // Development mode: allow all origins
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        use axum::http::{HeaderValue, Method};
        let origins: Vec<HeaderValue> = config
            .server
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::DELETE])
            .allow_headers(Any)
    };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Server listening on http://{addr}");

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for SIGINT or SIGTERM
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }

    info!("Waiting up to {timeout:?} for in-flight requests");
    // Connection draining itself is handled by axum's graceful_shutdown
}
