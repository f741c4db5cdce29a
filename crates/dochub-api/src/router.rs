//! Route definitions for the DocHub HTTP API.
//!
//! Folder and department segments accept an id or a slug; mutating routes
//! that take `{department}` or `{folder}` alone require an id.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.upload.max_body_bytes();

    let mut router = Router::new()
        .merge(department_routes())
        .merge(folder_routes())
        .merge(archive_routes())
        .merge(activity_routes())
        .merge(health_routes());

    // an absolute URL prefix means something else serves the bytes
    let prefix = state.storage.public_url_prefix().trim_end_matches('/').to_string();
    if let Some(root) = state.storage.local_root() {
        if prefix.starts_with('/') && prefix.len() > 1 {
            router = router.nest_service(&prefix, ServeDir::new(root));
        }
    }

    router
        .layer(DefaultBodyLimit::max(max_body))
        .layer(middleware::compression::build_compression_layer())
        .layer(middleware::cors::build_cors_layer(&state.config.server.cors))
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Department CRUD and the folders under a department
fn department_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/departments",
            get(handlers::department::list_departments).post(handlers::department::create_department),
        )
        .route(
            "/departments/{department}",
            get(handlers::department::get_department)
                .post(handlers::department::update_department_form)
                .put(handlers::department::update_department)
                .delete(handlers::department::delete_department),
        )
        .route(
            "/departments/{department}/folders",
            get(handlers::folder::list_folders).post(handlers::folder::create_folder),
        )
}

/// Folder rename/archive and the files within a folder
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders/slug/{slug}", get(handlers::folder::get_folder_by_slug))
        .route(
            "/folders/{folder}",
            put(handlers::folder::update_folder).delete(handlers::folder::archive_folder),
        )
        .route(
            "/folders/{folder}/files",
            get(handlers::file::list_files).post(handlers::file::upload_file),
        )
        .route(
            "/folders/{folder}/files/{file}",
            put(handlers::file::rename_file).delete(handlers::file::archive_file),
        )
}

/// Archive listing and restore
fn archive_routes() -> Router<AppState> {
    Router::new()
        .route("/archive", get(handlers::archive::list_archive))
        .route(
            "/archive/{item_type}/{id}",
            axum::routing::delete(handlers::archive::delete_permanently),
        )
        .route(
            "/archive/{item_type}/{id}/restore",
            post(handlers::archive::restore),
        )
}

/// Activity feed
fn activity_routes() -> Router<AppState> {
    Router::new().route("/activities", get(handlers::activity::list_activities))
}

/// Health checks
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
