//! Input checks shared by the services.

use dochub_core::error::AppError;
use dochub_core::result::AppResult;

/// Longest accepted display name, in characters.
pub const MAX_NAME_CHARS: usize = 255;

/// Trim a required name and enforce the length limit.
///
/// `field` is the request field reported in validation details and `label`
/// is how the field is named in the message.
pub fn required_name(field: &str, label: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation_field(
            field,
            format!("The {label} field is required."),
        ));
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(AppError::validation_field(
            field,
            format!("The {label} may not be greater than {MAX_NAME_CHARS} characters."),
        ));
    }
    Ok(trimmed.to_string())
}

/// Trim a name that may be left blank, enforcing the length limit.
pub fn optional_name(field: &str, label: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(AppError::validation_field(
            field,
            format!("The {label} may not be greater than {MAX_NAME_CHARS} characters."),
        ));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field, treating blank input as absent.
pub fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
