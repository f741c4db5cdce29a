//! Response DTOs.

use serde::{Deserialize, Serialize};

use dochub_entity::department::Department;
use dochub_entity::file::File;
use dochub_entity::folder::Folder;

/// A department with its public image URL.
#[derive(Debug, Clone, Serialize)]
pub struct DepartmentResponse {
    /// The department.
    #[serde(flatten)]
    pub department: Department,
    /// Public URL of the image, if one is set.
    pub image_url: Option<String>,
    /// The root folder, on creation only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_folder: Option<Folder>,
}

/// A file with the public URL of its bytes.
#[derive(Debug, Clone, Serialize)]
pub struct FileResponse {
    /// The file.
    #[serde(flatten)]
    pub file: File,
    /// Public URL.
    pub url: String,
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Wrap a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}

/// Detailed health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedHealthResponse {
    /// Overall status: `ok` or `degraded`.
    pub status: String,
    /// Persistence backend name.
    pub backend: String,
    /// Database status.
    pub database: String,
    /// Storage status.
    pub storage: String,
    /// Uptime in seconds.
    pub uptime_seconds: u64,
}
