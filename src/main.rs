//! DocHub Server: departmental document management.
//!
//! Loads configuration, installs logging, and serves the HTTP API.

use dochub_core::config::AppConfig;
use dochub_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    dochub_api::telemetry::init_logging(&config.logging);
    tracing::info!("Starting DocHub v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = dochub_api::run_server(config).await {
        tracing::error!(error = %e, "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from the file named by `DOCHUB_CONFIG` and the
/// environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("DOCHUB_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    AppConfig::load(&config_path)
}
