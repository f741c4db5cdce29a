//! Folder repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::types::{DepartmentId, FolderId};
use dochub_entity::archive::ArchivedFolderRow;
use dochub_entity::folder::{Folder, NewFolder};

use crate::store::{FolderStore, like_pattern, normalize_query};

/// PostgreSQL repository for folders.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_active_by_slug(
        &self,
        slug: &str,
        department_id: Option<DepartmentId>,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE slug = $1 AND archived_at IS NULL \
             AND ($2::uuid IS NULL OR department_id = $2) ORDER BY created_at ASC",
        )
        .bind(slug)
        .bind(department_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder by slug", e))
    }

    async fn list_active_by_department(
        &self,
        department_id: DepartmentId,
        query: Option<&str>,
    ) -> AppResult<Vec<Folder>> {
        let rows = match normalize_query(query) {
            Some(q) => sqlx::query_as::<_, Folder>(
                "SELECT * FROM folders WHERE department_id = $1 AND archived_at IS NULL \
                 AND (folder_name ILIKE $2 OR description ILIKE $2) ORDER BY folder_name ASC",
            )
            .bind(department_id)
            .bind(like_pattern(q))
            .fetch_all(&self.pool)
            .await,
            None => sqlx::query_as::<_, Folder>(
                "SELECT * FROM folders WHERE department_id = $1 AND archived_at IS NULL \
                 ORDER BY folder_name ASC",
            )
            .bind(department_id)
            .fetch_all(&self.pool)
            .await,
        };

        rows.map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    async fn slugs_in_department(&self, department_id: DepartmentId) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT slug FROM folders WHERE department_id = $1")
            .bind(department_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list folder slugs", e)
            })
    }

    async fn create(&self, data: &NewFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, department_id, folder_name, description, slug) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(FolderId::new())
        .bind(data.department_id)
        .bind(&data.folder_name)
        .bind(&data.description)
        .bind(&data.slug)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("folders_department_id_slug_key") =>
            {
                AppError::conflict(format!("Folder slug '{}' already exists", data.slug))
            }
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("folders_department_id_fkey") =>
            {
                AppError::not_found(format!("Department {} not found", data.department_id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create folder", e),
        })
    }

    async fn rename(
        &self,
        id: FolderId,
        folder_name: &str,
        description: Option<&str>,
    ) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET folder_name = $2, description = $3, updated_at = NOW() \
             WHERE id = $1 AND archived_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(folder_name)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    async fn archive_with_files(
        &self,
        id: FolderId,
        at: DateTime<Utc>,
    ) -> AppResult<(Folder, u64)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let folder = sqlx::query_as::<_, Folder>(
            "UPDATE folders SET archived_at = $2, updated_at = NOW() \
             WHERE id = $1 AND archived_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to archive folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;

        let files = sqlx::query(
            "UPDATE files SET archived_at = $2, updated_at = NOW() \
             WHERE folder_id = $1 AND archived_at IS NULL",
        )
        .bind(id)
        .bind(at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to archive folder files", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok((folder, files.rows_affected()))
    }

    async fn restore(&self, id: FolderId) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET archived_at = NULL, updated_at = NOW() \
             WHERE id = $1 AND archived_at IS NOT NULL RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to restore folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Archived folder {id} not found")))
    }

    async fn list_archived(&self) -> AppResult<Vec<ArchivedFolderRow>> {
        sqlx::query_as::<_, ArchivedFolderRow>(
            "SELECT f.id, f.folder_name, f.department_id, d.name AS department_name, f.archived_at \
             FROM folders f LEFT JOIN departments d ON d.id = f.department_id \
             WHERE f.archived_at IS NOT NULL ORDER BY f.archived_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list archived folders", e)
        })
    }
}
