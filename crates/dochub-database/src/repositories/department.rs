//! Department repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::types::{DepartmentId, FolderId};
use dochub_entity::department::{Department, DepartmentChanges, NewDepartment};
use dochub_entity::folder::Folder;

use crate::store::{DepartmentStore, like_pattern, normalize_query};

/// PostgreSQL repository for departments.
#[derive(Debug, Clone)]
pub struct DepartmentRepository {
    pool: PgPool,
}

impl DepartmentRepository {
    /// Create a new department repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map unique violations on the departments table.
fn map_write_error(e: sqlx::Error, name: &str, action: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("departments_name_key") =>
        {
            AppError::validation_field("name", format!("The name '{name}' has already been taken."))
        }
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("departments_slug_key") =>
        {
            AppError::conflict(format!("Department slug for '{name}' is already in use"))
        }
        _ => AppError::with_source(ErrorKind::Database, format!("Failed to {action} department"), e),
    }
}

#[async_trait]
impl DepartmentStore for DepartmentRepository {
    async fn list(&self, query: Option<&str>) -> AppResult<Vec<Department>> {
        let rows = match normalize_query(query) {
            Some(q) => sqlx::query_as::<_, Department>(
                "SELECT * FROM departments \
                 WHERE name ILIKE $1 OR alias ILIKE $1 OR slug ILIKE $1 \
                 ORDER BY name ASC",
            )
            .bind(like_pattern(q))
            .fetch_all(&self.pool)
            .await,
            None => sqlx::query_as::<_, Department>("SELECT * FROM departments ORDER BY name ASC")
                .fetch_all(&self.pool)
                .await,
        };

        rows.map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list departments", e))
    }

    async fn find_by_id(&self, id: DepartmentId) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find department", e))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE slug = $1")
            .bind(slug)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find department by slug", e)
            })
    }

    async fn find_by_image(&self, key: &str) -> AppResult<Option<Department>> {
        sqlx::query_as::<_, Department>("SELECT * FROM departments WHERE image = $1 LIMIT 1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find department by image", e)
            })
    }

    async fn slugs(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT slug FROM departments")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list department slugs", e)
            })
    }

    async fn create_with_root_folder(
        &self,
        data: &NewDepartment,
        root_folder_slug: &str,
    ) -> AppResult<(Department, Folder)> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let department = sqlx::query_as::<_, Department>(
            "INSERT INTO departments (id, name, alias, slug, image) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(DepartmentId::new())
        .bind(&data.name)
        .bind(&data.alias)
        .bind(&data.slug)
        .bind(&data.image)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, &data.name, "create"))?;

        let root_folder = sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (id, department_id, folder_name, slug) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(FolderId::new())
        .bind(department.id)
        .bind(&department.name)
        .bind(root_folder_slug)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create root folder", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok((department, root_folder))
    }

    async fn update(
        &self,
        id: DepartmentId,
        changes: &DepartmentChanges,
    ) -> AppResult<Department> {
        sqlx::query_as::<_, Department>(
            "UPDATE departments SET name = $2, alias = $3, image = COALESCE($4, image), \
             updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.alias)
        .bind(&changes.image)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &changes.name, "update"))?
        .ok_or_else(|| AppError::not_found(format!("Department {id} not found")))
    }

    async fn delete(&self, id: DepartmentId) -> AppResult<Vec<String>> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        // row locks keep concurrent folder and file inserts out until commit
        let locked = sqlx::query_scalar::<_, DepartmentId>(
            "SELECT id FROM departments WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock department", e))?;
        if locked.is_none() {
            return Err(AppError::not_found(format!("Department {id} not found")));
        }

        sqlx::query("SELECT id FROM folders WHERE department_id = $1 FOR UPDATE")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to lock folders", e))?;

        let paths = sqlx::query_scalar::<_, String>(
            "DELETE FROM files WHERE folder_id IN \
             (SELECT id FROM folders WHERE department_id = $1) RETURNING file_path",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete files", e))?;

        sqlx::query("DELETE FROM departments WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete department", e)
            })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(paths)
    }
}
