//! Router construction and the serve loop.

use std::sync::Arc;

use axum::{
    routing::{any, get},
    Extension, Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::handlers;
use crate::state::AppState;

/// Create the proxy router.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Raw file proxy (any method, GET semantics)
        .route("/", any(handlers::radar::radar_file_handler))
        .route("/radar", any(handlers::radar::radar_file_handler))
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}

/// Bind the configured address and serve until Ctrl+C.
pub async fn run_server(state: Arc<AppState>) -> anyhow::Result<()> {
    let addr = state.config.listen_addr()?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(address = %addr, "Radar proxy listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Radar proxy stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    info!("Received shutdown signal");
}
