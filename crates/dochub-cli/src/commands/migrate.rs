//! Database migration command.

use clap::Args;

use dochub_core::config::AppConfig;
use dochub_core::error::AppError;
use dochub_database::DatabasePool;
use dochub_database::migration::run_migrations;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Database URL, overriding `database.url`
    #[arg(long)]
    pub url: Option<String>,
}

/// Apply all pending migrations to the configured PostgreSQL database.
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let mut database = config.database.clone();
    if let Some(ref url) = args.url {
        database.url = url.clone();
    }

    let pool = DatabasePool::connect(&database).await?;
    println!("Running database migrations...");
    run_migrations(&pool).await?;
    pool.close().await;

    output::print_success("All migrations applied successfully.");
    Ok(())
}
