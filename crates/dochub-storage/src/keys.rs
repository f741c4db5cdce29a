//! Object key generation.

use uuid::Uuid;

use crate::mime::extension_from_name;

/// Prefix for documents uploaded into folders.
pub const UPLOADS_PREFIX: &str = "uploads";

/// Prefix for department images.
pub const DEPARTMENT_IMAGES_PREFIX: &str = "departments";

/// Generate a fresh key under `prefix`, keeping the client's extension.
///
/// ```
/// let key = dochub_storage::keys::object_key("uploads", "Budget 2024.PDF");
/// assert!(key.starts_with("uploads/"));
/// assert!(key.ends_with(".pdf"));
/// ```
pub fn object_key(prefix: &str, original_name: &str) -> String {
    let id = Uuid::new_v4().simple();
    match extension_from_name(original_name) {
        Some(ext) => format!("{prefix}/{id}.{ext}"),
        None => format!("{prefix}/{id}"),
    }
}
