//! CLI command definitions and dispatch.

pub mod activity;
pub mod archive;
pub mod department;
pub mod migrate;
pub mod serve;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use dochub_core::config::AppConfig;
use dochub_core::config::logging::LoggingConfig;
use dochub_core::error::AppError;
use dochub_database::Stores;
use dochub_service::{RequestContext, Services};
use dochub_storage::StorageManager;

use crate::output::OutputFormat;

/// DocHub: departmental document management
#[derive(Debug, Parser)]
#[command(name = "dochub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the DocHub server
    Serve(serve::ServeArgs),
    /// Apply database migrations
    Migrate(migrate::MigrateArgs),
    /// Department administration
    Department(department::DepartmentArgs),
    /// Archived folders and files
    Archive(archive::ArchiveArgs),
    /// Activity feed
    Activity(activity::ActivityArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = AppConfig::load(&self.config)?;

        // only the server logs at the configured level
        let logging = match self.command {
            Commands::Serve(_) => config.logging.clone(),
            _ => LoggingConfig {
                level: "warn".to_string(),
                ..config.logging.clone()
            },
        };
        dochub_api::telemetry::init_logging(&logging);

        match &self.command {
            Commands::Serve(args) => serve::execute(args, config).await,
            Commands::Migrate(args) => migrate::execute(args, &config).await,
            Commands::Department(args) => department::execute(args, &config, self.format).await,
            Commands::Archive(args) => archive::execute(args, &config, self.format).await,
            Commands::Activity(args) => activity::execute(args, &config, self.format).await,
        }
    }
}

/// Stores and services opened from configuration.
pub struct Backend {
    /// Persistence.
    pub stores: Stores,
    /// Business services.
    pub services: Services,
}

impl Backend {
    /// Connect storage and persistence the way the server does.
    pub async fn open(config: &AppConfig) -> Result<Self, AppError> {
        if config.database.provider == "memory" {
            tracing::warn!("database.provider is \"memory\"; changes will not outlive this command");
        }
        let storage = Arc::new(StorageManager::from_config(&config.storage).await?);
        let stores = Stores::connect(&config.database).await?;
        let services = Services::new(&stores, storage, config);
        Ok(Self { stores, services })
    }

    /// Release database connections.
    pub async fn close(self) {
        self.stores.close().await;
    }
}

/// Context for mutations made from the command line.
pub fn cli_context() -> RequestContext {
    let user = std::env::var("USER").unwrap_or_else(|_| "cli".to_string());
    RequestContext::system(&user)
}
