use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::models::HealthResponse;
use crate::AppState;

pub mod ask;

pub use ask::ask_handler;

pub const SERVICE_NAME: &str = "graph-chain-rs";

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/ask", get(ask_handler))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match state.store.ping().await {
        Ok(()) => {
            info!("Health check passed");
            (
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy",
                    service: SERVICE_NAME,
                    database: "connected",
                }),
            )
        }
        Err(e) => {
            error!("Database ping failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unhealthy",
                    service: SERVICE_NAME,
                    database: "ping failed",
                }),
            )
        }
    }
}
