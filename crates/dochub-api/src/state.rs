//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use dochub_core::config::AppConfig;
use dochub_database::Stores;
use dochub_service::Services;
use dochub_storage::StorageManager;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Persistence backend
    pub stores: Stores,
    /// Stored bytes
    pub storage: Arc<StorageManager>,
    /// Business services
    pub services: Arc<Services>,
    /// When the process started serving
    pub started_at: Instant,
}

impl AppState {
    /// Wire services on top of the given stores and storage.
    pub fn new(config: AppConfig, stores: Stores, storage: Arc<StorageManager>) -> Self {
        let services = Services::new(&stores, storage.clone(), &config);
        Self {
            config: Arc::new(config),
            stores,
            storage,
            services: Arc::new(services),
            started_at: Instant::now(),
        }
    }

    /// Seconds since startup.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
