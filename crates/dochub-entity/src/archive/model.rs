//! Archived item read model.
//!
//! The archive view merges archived folders and archived files into one
//! list. Each source has its own row type; both convert into
//! [`ArchivedItem`].

use chrono::{DateTime, Utc};
use dochub_core::types::{DepartmentId, FileId, FolderId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::item::ItemType;

/// An archived folder or file with enough context to show where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivedItem {
    /// Folder or file id.
    pub id: Uuid,
    /// Folder or file.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// Folder name or file name.
    pub name: String,
    /// Name of the department the item belongs to.
    pub department_name: Option<String>,
    /// When the item was archived.
    pub archived_at: DateTime<Utc>,
    /// Original location and file details.
    pub metadata: ArchivedMetadata,
}

/// Where an archived item lived, plus file details.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchivedMetadata {
    /// For files: the containing folder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_folder_id: Option<FolderId>,
    /// For files: the containing folder's name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_folder_name: Option<String>,
    /// For folders: the owning department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_department_id: Option<DepartmentId>,
    /// For files: MIME type.
    #[serde(rename = "fileType", skip_serializing_if = "Option::is_none")]
    pub file_type: Option<String>,
    /// For files: size in bytes.
    #[serde(rename = "fileSize", skip_serializing_if = "Option::is_none")]
    pub file_size: Option<i64>,
}

/// An archived folder joined with its department.
#[derive(Debug, Clone, FromRow)]
pub struct ArchivedFolderRow {
    /// Folder id.
    pub id: FolderId,
    /// Folder name.
    pub folder_name: String,
    /// Owning department.
    pub department_id: DepartmentId,
    /// Department name.
    pub department_name: Option<String>,
    /// Archive timestamp.
    pub archived_at: DateTime<Utc>,
}

/// An archived file joined with its folder and department.
#[derive(Debug, Clone, FromRow)]
pub struct ArchivedFileRow {
    /// File id.
    pub id: FileId,
    /// File name.
    pub file_name: String,
    /// MIME type.
    pub file_type: String,
    /// Size in bytes.
    pub file_size: i64,
    /// Containing folder.
    pub folder_id: FolderId,
    /// Containing folder's name.
    pub folder_name: Option<String>,
    /// Department name.
    pub department_name: Option<String>,
    /// Archive timestamp.
    pub archived_at: DateTime<Utc>,
}

impl From<ArchivedFolderRow> for ArchivedItem {
    fn from(row: ArchivedFolderRow) -> Self {
        Self {
            id: row.id.into_uuid(),
            item_type: ItemType::Folder,
            name: row.folder_name,
            department_name: row.department_name,
            archived_at: row.archived_at,
            metadata: ArchivedMetadata {
                original_department_id: Some(row.department_id),
                ..Default::default()
            },
        }
    }
}

impl From<ArchivedFileRow> for ArchivedItem {
    fn from(row: ArchivedFileRow) -> Self {
        Self {
            id: row.id.into_uuid(),
            item_type: ItemType::File,
            name: row.file_name,
            department_name: row.department_name,
            archived_at: row.archived_at,
            metadata: ArchivedMetadata {
                original_folder_id: Some(row.folder_id),
                original_folder_name: row.folder_name,
                file_type: Some(row.file_type),
                file_size: Some(row.file_size),
                ..Default::default()
            },
        }
    }
}
