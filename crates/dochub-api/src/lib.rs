//! # dochub-api
//!
//! HTTP API layer for DocHub built on Axum.
//!
//! Provides the REST endpoints for departments, folders, files, the
//! archive, and the activity feed, plus the middleware stack (request
//! logging, CORS, compression), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;
pub mod telemetry;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
