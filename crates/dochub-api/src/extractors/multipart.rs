//! `FormFields` extractor: reads a whole multipart form into memory.
//!
//! Parts with a file name are kept as uploads; the rest are text fields.
//! The body limit set on the router bounds how much this can buffer.

use std::collections::HashMap;

use axum::extract::{FromRequest, Multipart, Request};
use bytes::Bytes;

use dochub_core::error::AppError;

use crate::error::ApiError;

/// A file part of a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedPart {
    /// Client-supplied file name.
    pub file_name: String,
    /// Declared content type.
    pub content_type: Option<String>,
    /// Contents.
    pub bytes: Bytes,
}

/// Text fields and file parts of a multipart form.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    text: HashMap<String, String>,
    files: HashMap<String, UploadedPart>,
}

impl FormFields {
    /// A text field, if present.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.text.get(name).map(String::as_str)
    }

    /// Remove and return a file part.
    pub fn take_file(&mut self, name: &str) -> Option<UploadedPart> {
        self.files.remove(name)
    }

    /// Whether the form has a field of either kind named `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.text.contains_key(name) || self.files.contains_key(name)
    }
}

impl<S: Send + Sync> FromRequest<S> for FormFields {
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(format!("Expected a multipart form: {}", e.body_text())))?;

        let mut fields = FormFields::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
        {
            let Some(name) = field.name().map(String::from) else {
                continue;
            };

            match field.file_name().map(String::from) {
                Some(file_name) => {
                    let content_type = field.content_type().map(String::from);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                    fields.files.insert(
                        name,
                        UploadedPart {
                            file_name,
                            content_type,
                            bytes,
                        },
                    );
                }
                None => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                    fields.text.insert(name, text);
                }
            }
        }

        Ok(fields)
    }
}
