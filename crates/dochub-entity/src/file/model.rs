//! File entity model.

use chrono::{DateTime, Utc};
use dochub_core::types::{FileId, FolderId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An uploaded document.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// The folder containing this file.
    pub folder_id: FolderId,
    /// Display name (including extension).
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// Key of the stored bytes.
    #[serde(rename = "filePath")]
    pub file_path: String,
    /// MIME type.
    #[serde(rename = "fileType")]
    pub file_type: String,
    /// Size in bytes.
    #[serde(rename = "fileSize")]
    pub file_size: i64,
    /// When the file was archived (null while active).
    pub archived_at: Option<DateTime<Utc>>,
    /// When the file was uploaded.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Whether the file is archived.
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.file_name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.file_name)
            .map(|ext| ext.to_lowercase())
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone)]
pub struct NewFile {
    /// The folder to place the file in.
    pub folder_id: FolderId,
    /// Display name.
    pub file_name: String,
    /// Key of the already-written bytes.
    pub file_path: String,
    /// MIME type.
    pub file_type: String,
    /// Size in bytes.
    pub file_size: i64,
}
