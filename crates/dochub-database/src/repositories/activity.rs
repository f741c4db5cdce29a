//! Activity log repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::types::ActivityId;
use dochub_entity::activity::{Activity, ActivityEntry, NewActivity};

use crate::store::ActivityStore;

/// PostgreSQL repository for the append-only activity log.
#[derive(Debug, Clone)]
pub struct ActivityRepository {
    pool: PgPool,
}

impl ActivityRepository {
    /// Create a new activity repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for ActivityRepository {
    async fn append(&self, data: &NewActivity) -> AppResult<Activity> {
        sqlx::query_as::<_, Activity>(
            "INSERT INTO activities (id, department_id, folder_id, item_name, item_type, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(ActivityId::new())
        .bind(data.department_id)
        .bind(data.folder_id)
        .bind(&data.item_name)
        .bind(data.item_type)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append activity", e))
    }

    async fn list_recent(&self, limit: usize) -> AppResult<Vec<ActivityEntry>> {
        sqlx::query_as::<_, ActivityEntry>(
            "SELECT a.*, d.name AS department_name, d.slug AS department_slug, \
                    f.folder_name AS folder_name, f.slug AS folder_slug \
             FROM activities a \
             LEFT JOIN departments d ON d.id = a.department_id \
             LEFT JOIN folders f ON f.id = a.folder_id \
             ORDER BY a.created_at DESC, a.id DESC LIMIT $1",
        )
        .bind(limit as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list activities", e))
    }
}
