//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// GET /health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let database_ok = state.stores.health_check().await.unwrap_or(false);
    let storage_ok = state.storage.health_check().await;

    Json(DetailedHealthResponse {
        status: if database_ok && storage_ok { "ok" } else { "degraded" }.to_string(),
        backend: state.stores.backend().to_string(),
        database: if database_ok { "connected" } else { "unavailable" }.to_string(),
        storage: if storage_ok { "available" } else { "unavailable" }.to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}
