//! Department image states.

use bytes::Bytes;

/// The image attached to a department request.
///
/// Handlers produce `PendingUpload` from multipart input; the department
/// service writes the bytes and persists only a `StoredPath`.
#[derive(Debug, Clone, Default)]
pub enum DepartmentImage {
    /// No image supplied.
    #[default]
    Unset,
    /// An image already present in storage.
    StoredPath(String),
    /// Raw image bytes still to be written.
    PendingUpload {
        /// Image contents.
        bytes: Bytes,
        /// Client-supplied file name.
        file_name: String,
        /// Client-declared content type.
        content_type: Option<String>,
    },
}

impl DepartmentImage {
    /// Whether no image was supplied.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}
