//! Database migration runner.

use tracing::info;

use dochub_core::error::{AppError, ErrorKind};

use crate::connection::DatabasePool;

/// Run all pending migrations from the workspace `migrations/` directory.
pub async fn run_migrations(db: &DatabasePool) -> Result<(), AppError> {
    let migrator = sqlx::migrate!("../../migrations");
    info!(
        available = migrator.iter().count(),
        "Running database migrations"
    );

    migrator.run(db.pool()).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Database migrations completed");
    Ok(())
}
