//! Application builder: storage, stores, services, router, and the server
//! loop with graceful shutdown.

use std::sync::Arc;

use axum::Router;
use tracing::info;

use dochub_core::config::AppConfig;
use dochub_core::error::{AppError, ErrorKind};
use dochub_database::Stores;
use dochub_storage::StorageManager;

use crate::router::build_router;
use crate::state::AppState;

/// Connect the configured backends and build the shared state.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    let storage = Arc::new(StorageManager::from_config(&config.storage).await?);
    let stores = Stores::connect(&config.database).await?;
    Ok(AppState::new(config, stores, storage))
}

/// Builds the complete Axum application.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the DocHub server until Ctrl-C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    info!("Starting DocHub server...");

    let addr = config.server.bind_address();
    let state = build_state(config).await?;
    let stores = state.stores.clone();
    info!(backend = stores.backend(), "Persistence ready");

    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(ErrorKind::Configuration, format!("Failed to bind {addr}"), e)
    })?;

    info!(address = %addr, "DocHub server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, "Server error", e))?;

    stores.close().await;
    info!("DocHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
