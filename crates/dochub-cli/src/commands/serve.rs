//! Start the DocHub server.

use clap::Args;

use dochub_core::config::AppConfig;
use dochub_core::error::AppError;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Override the persistence backend (`postgres` or `memory`)
    #[arg(long)]
    pub database: Option<String>,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, mut config: AppConfig) -> Result<(), AppError> {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref provider) = args.database {
        config.database.provider = provider.clone();
    }

    println!("Starting DocHub server...");
    println!("  Address:  {}", config.server.bind_address());
    println!("  Database: {}", config.database.provider);

    dochub_api::run_server(config).await
}
