//! Upload acceptance checks.

use dochub_core::config::upload::UploadPolicy;
use dochub_core::error::AppError;
use dochub_core::result::AppResult;

/// Reject empty, oversized, or disallowed uploads.
///
/// `field` is the multipart field name reported in validation details.
pub fn check_upload(
    policy: &UploadPolicy,
    field: &str,
    bytes: &[u8],
    mime_type: Option<&str>,
) -> AppResult<()> {
    if bytes.is_empty() {
        return Err(AppError::validation_field(
            field,
            format!("The {field} must not be empty."),
        ));
    }

    if bytes.len() as u64 > policy.max_size_bytes {
        return Err(AppError::validation_field(
            field,
            format!(
                "The {field} may not be greater than {} kilobytes.",
                policy.max_size_bytes / 1024
            ),
        ));
    }

    match mime_type {
        Some(mime) if policy.allows(mime) => Ok(()),
        _ => Err(AppError::validation_field(
            field,
            format!(
                "The {field} must be a file of type: {}.",
                policy.allowed_mime_types.join(", ")
            ),
        )),
    }
}
