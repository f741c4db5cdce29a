//! Store bundle selected from configuration.

use std::sync::Arc;

use tracing::info;

use dochub_core::config::database::DatabaseConfig;
use dochub_core::error::AppError;
use dochub_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::MemoryStore;
use crate::migration::run_migrations;
use crate::repositories::{
    ActivityRepository, DepartmentRepository, FileRepository, FolderRepository,
};
use crate::store::{ActivityStore, DepartmentStore, FileStore, FolderStore};

/// The four stores the services depend on, all backed by one provider.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Department persistence.
    pub departments: Arc<dyn DepartmentStore>,
    /// Folder persistence.
    pub folders: Arc<dyn FolderStore>,
    /// File persistence.
    pub files: Arc<dyn FileStore>,
    /// Activity log persistence.
    pub activities: Arc<dyn ActivityStore>,
    pool: Option<DatabasePool>,
}

impl Stores {
    /// Build the stores named by `config.provider`.
    ///
    /// Supported providers: `"postgres"` and `"memory"`.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            "postgres" => {
                let pool = DatabasePool::connect(config).await?;
                if config.auto_migrate {
                    run_migrations(&pool).await?;
                }
                info!("Using PostgreSQL store");
                Ok(Self::postgres(pool))
            }
            "memory" => {
                info!("Using in-memory store");
                Ok(Self::in_memory())
            }
            other => Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Expected 'postgres' or 'memory'"
            ))),
        }
    }

    /// Stores backed by PostgreSQL repositories.
    pub fn postgres(pool: DatabasePool) -> Self {
        let pg = pool.pool().clone();
        Self {
            departments: Arc::new(DepartmentRepository::new(pg.clone())),
            folders: Arc::new(FolderRepository::new(pg.clone())),
            files: Arc::new(FileRepository::new(pg.clone())),
            activities: Arc::new(ActivityRepository::new(pg)),
            pool: Some(pool),
        }
    }

    /// Stores backed by one shared in-memory table set.
    pub fn in_memory() -> Self {
        let memory = MemoryStore::new();
        Self {
            departments: Arc::new(memory.clone()),
            folders: Arc::new(memory.clone()),
            files: Arc::new(memory.clone()),
            activities: Arc::new(memory),
            pool: None,
        }
    }

    /// Name of the active backend.
    pub fn backend(&self) -> &'static str {
        if self.pool.is_some() { "postgres" } else { "memory" }
    }

    /// Check backend connectivity. The memory backend is always healthy.
    pub async fn health_check(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => pool.health_check().await,
            None => Ok(true),
        }
    }

    /// Close the underlying pool, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dochub_core::error::ErrorKind;

    #[tokio::test]
    async fn test_connect_memory() {
        let stores = Stores::connect(&DatabaseConfig::default()).await.unwrap();
        assert_eq!(stores.backend(), "memory");
        assert!(stores.health_check().await.unwrap());
        assert!(stores.departments.list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_connect_unknown_provider() {
        let config = DatabaseConfig {
            provider: "sqlite".to_string(),
            ..Default::default()
        };
        let err = Stores::connect(&config).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
