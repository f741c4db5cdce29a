//! Folder entity model.

use chrono::{DateTime, Utc};
use dochub_core::types::{DepartmentId, FolderId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A folder inside a department.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// The owning department.
    pub department_id: DepartmentId,
    /// Display name.
    #[serde(rename = "folderName")]
    pub folder_name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Slug, unique within the department including archived folders.
    pub slug: String,
    /// When the folder was archived (null while active).
    pub archived_at: Option<DateTime<Utc>>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// Whether the folder is archived.
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone)]
pub struct NewFolder {
    /// The owning department.
    pub department_id: DepartmentId,
    /// Display name.
    pub folder_name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Pre-assigned slug.
    pub slug: String,
}
