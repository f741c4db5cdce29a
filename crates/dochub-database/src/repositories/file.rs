//! File repository implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::types::{FileId, FolderId};
use dochub_entity::archive::ArchivedFileRow;
use dochub_entity::file::{File, NewFile};

use crate::store::FileStore;

/// PostgreSQL repository for files.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for FileRepository {
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn list_active_by_folder(&self, folder_id: FolderId) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE folder_id = $1 AND archived_at IS NULL \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(folder_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn create(&self, data: &NewFile) -> AppResult<File> {
        // The insert only happens while the folder is active.
        sqlx::query_as::<_, File>(
            "INSERT INTO files (id, folder_id, file_name, file_path, file_type, file_size) \
             SELECT $1, $2, $3, $4, $5, $6 \
             WHERE EXISTS (SELECT 1 FROM folders WHERE id = $2 AND archived_at IS NULL) \
             RETURNING *",
        )
        .bind(FileId::new())
        .bind(data.folder_id)
        .bind(&data.file_name)
        .bind(&data.file_path)
        .bind(&data.file_type)
        .bind(data.file_size)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {} not found", data.folder_id)))
    }

    async fn rename(&self, id: FileId, file_name: &str) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET file_name = $2, updated_at = NOW() \
             WHERE id = $1 AND archived_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(file_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn archive(&self, id: FileId, at: DateTime<Utc>) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET archived_at = $2, updated_at = NOW() \
             WHERE id = $1 AND archived_at IS NULL RETURNING *",
        )
        .bind(id)
        .bind(at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to archive file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn restore(&self, id: FileId) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET archived_at = NULL, updated_at = NOW() \
             WHERE id = $1 AND archived_at IS NOT NULL RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to restore file", e))?
        .ok_or_else(|| AppError::not_found(format!("Archived file {id} not found")))
    }

    async fn list_archived(&self) -> AppResult<Vec<ArchivedFileRow>> {
        sqlx::query_as::<_, ArchivedFileRow>(
            "SELECT fi.id, fi.file_name, fi.file_type, fi.file_size, fi.folder_id, \
                    fo.folder_name, d.name AS department_name, fi.archived_at \
             FROM files fi \
             LEFT JOIN folders fo ON fo.id = fi.folder_id \
             LEFT JOIN departments d ON d.id = fo.department_id \
             WHERE fi.archived_at IS NOT NULL ORDER BY fi.archived_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list archived files", e))
    }
}
