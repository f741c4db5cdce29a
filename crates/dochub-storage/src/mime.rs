//! MIME type helpers.

/// Lower-case extension of a file name, if it has one.
pub fn extension_from_name(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Guess a MIME type from a file path extension.
pub fn mime_from_path(path: &str) -> Option<String> {
    let ext = extension_from_name(path.rsplit('/').next().unwrap_or(path))?;
    let mime = match ext.as_str() {
        "txt" => "text/plain",
        "csv" => "text/csv",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "zip" => "application/zip",
        _ => return None,
    };
    Some(mime.to_string())
}

/// Pick the MIME type for an upload.
///
/// A declared type is trusted unless it is missing or the generic
/// `application/octet-stream`, in which case the extension decides.
pub fn resolve_mime(declared: Option<&str>, file_name: &str) -> Option<String> {
    let declared = declared
        .map(|m| m.split(';').next().unwrap_or(m).trim().to_ascii_lowercase())
        .filter(|m| !m.is_empty() && m != "application/octet-stream");

    declared.or_else(|| mime_from_path(file_name))
}
