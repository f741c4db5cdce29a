//! Tracing subscriber setup shared by the server and the CLI.

use tracing_subscriber::{EnvFilter, fmt};

use dochub_core::config::logging::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` overrides the configured
/// level; `format = "json"` switches to JSON lines.
///
/// Calling this twice is harmless: the second install is ignored.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let result = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .try_init(),
        _ => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init(),
    };

    if result.is_err() {
        tracing::debug!("Tracing subscriber already installed");
    }
}
