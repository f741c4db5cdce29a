//! Upload acceptance policies.

use serde::{Deserialize, Serialize};

/// Policies for the two kinds of accepted uploads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Documents uploaded into folders.
    #[serde(default = "default_files_policy")]
    pub files: UploadPolicy,
    /// Department images.
    #[serde(default = "default_images_policy")]
    pub images: UploadPolicy,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            files: default_files_policy(),
            images: default_images_policy(),
        }
    }
}

impl UploadConfig {
    /// The largest body any upload route needs to accept.
    pub fn max_body_bytes(&self) -> usize {
        // multipart framing overhead
        let slack = 64 * 1024;
        self.files.max_size_bytes.max(self.images.max_size_bytes) as usize + slack
    }
}

/// Maximum size and allowed MIME types for one upload kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadPolicy {
    /// Maximum accepted size in bytes.
    pub max_size_bytes: u64,
    /// Accepted MIME types.
    pub allowed_mime_types: Vec<String>,
}

impl UploadPolicy {
    /// Whether `mime_type` is in the allow-list (case-insensitive).
    pub fn allows(&self, mime_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mime_type))
    }
}

fn default_files_policy() -> UploadPolicy {
    UploadPolicy {
        max_size_bytes: 20 * 1024 * 1024,
        allowed_mime_types: [
            "application/pdf",
            "application/msword",
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "image/jpeg",
            "image/png",
        ]
        .iter()
        .map(|m| m.to_string())
        .collect(),
    }
}

fn default_images_policy() -> UploadPolicy {
    UploadPolicy {
        max_size_bytes: 5 * 1024 * 1024,
        allowed_mime_types: ["image/jpeg", "image/png", "image/gif", "image/webp"]
            .iter()
            .map(|m| m.to_string())
            .collect(),
    }
}
