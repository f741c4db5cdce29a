//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Create or rename a folder.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct FolderRequest {
    /// Folder name.
    #[serde(rename = "folderName")]
    #[validate(length(min = 1, message = "The folder name field is required."))]
    pub folder_name: String,
    /// Optional description.
    pub description: Option<String>,
}

/// Rename a file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RenameFileRequest {
    /// New file name.
    #[serde(rename = "fileName")]
    #[validate(length(min = 1, message = "The file name field is required."))]
    pub file_name: String,
}

/// `?q=` filter for list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring.
    pub q: Option<String>,
}

/// `?department=` on folder lookups by slug.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FolderLookupQuery {
    /// Department id or slug.
    pub department: Option<String>,
}

/// `?limit=` on the activity feed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedQuery {
    /// Maximum number of entries.
    pub limit: Option<usize>,
}
