//! Single-request document upload.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use dochub_core::config::upload::UploadPolicy;
use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_database::store::{DepartmentStore, FileStore, FolderStore};
use dochub_entity::activity::ActivityStatus;
use dochub_entity::file::{File, NewFile};
use dochub_storage::StorageManager;
use dochub_storage::keys::{UPLOADS_PREFIX, object_key};
use dochub_storage::mime::resolve_mime;

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;
use crate::lookup::{self, FolderRef};
use crate::upload_policy::check_upload;
use crate::validation::required_name;

/// An uploaded document as received from the client.
#[derive(Debug, Clone)]
pub struct UploadInput {
    /// File contents.
    pub bytes: Bytes,
    /// Client-supplied file name.
    pub file_name: String,
    /// Client-declared content type.
    pub content_type: Option<String>,
}

/// Validates uploads, stores their bytes, and records them.
#[derive(Debug, Clone)]
pub struct UploadService {
    departments: Arc<dyn DepartmentStore>,
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    storage: Arc<StorageManager>,
    policy: UploadPolicy,
    activity: ActivityRecorder,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        departments: Arc<dyn DepartmentStore>,
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        storage: Arc<StorageManager>,
        policy: UploadPolicy,
        activity: ActivityRecorder,
    ) -> Self {
        Self {
            departments,
            folders,
            files,
            storage,
            policy,
            activity,
        }
    }

    /// The active upload policy.
    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// Uploads a document into an active folder.
    ///
    /// Bytes go to a fresh key; if the record cannot be written afterwards
    /// the bytes are removed again.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        folder: FolderRef<'_>,
        input: UploadInput,
    ) -> AppResult<File> {
        let folder =
            lookup::folder_ref(self.departments.as_ref(), self.folders.as_ref(), folder).await?;

        let file_name = required_name("file", "file name", base_name(&input.file_name))?;
        let mime = resolve_mime(input.content_type.as_deref(), &file_name);
        check_upload(&self.policy, "file", &input.bytes, mime.as_deref())?;
        let file_type = mime.ok_or_else(|| AppError::internal("MIME type missing after check"))?;

        let key = object_key(UPLOADS_PREFIX, &file_name);
        let file_size = input.bytes.len() as i64;
        self.storage.put(&key, input.bytes).await?;

        let data = NewFile {
            folder_id: folder.id,
            file_name,
            file_path: key.clone(),
            file_type,
            file_size,
        };
        let file = match self.files.create(&data).await {
            Ok(file) => file,
            Err(e) => {
                warn!(key = %key, error = %e, "File record not written, removing stored bytes");
                self.storage.delete_quietly([key.as_str()]).await;
                return Err(e);
            }
        };

        info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_name(),
            file_id = %file.id,
            folder_id = %folder.id,
            size = file.file_size,
            mime = %file.file_type,
            "File uploaded"
        );

        self.activity
            .file_event(ctx, &file, Some(&folder), ActivityStatus::Added)
            .await;
        Ok(file)
    }
}

/// Strip any directory part a client put in the file name.
fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dochub_core::error::ErrorKind;

    use crate::test_support::fixture;

    fn input(name: &str, mime: &str, bytes: &'static [u8]) -> UploadInput {
        UploadInput {
            bytes: Bytes::from_static(bytes),
            file_name: name.to_string(),
            content_type: Some(mime.to_string()),
        }
    }

    #[tokio::test]
    async fn test_same_name_gets_distinct_keys() {
        let fx = fixture().await;
        let (department, _) = fx.department("Finance").await;
        let folder = fx.folder(&department, "Budgets").await;

        let first = fx.pdf(&folder, "budget.pdf").await;
        let second = fx.pdf(&folder, "budget.pdf").await;

        assert_ne!(first.file_path, second.file_path);
        assert!(first.file_path.starts_with("uploads/"));
        assert!(first.file_path.ends_with(".pdf"));
        assert_eq!(first.file_size, 13);
        assert_eq!(fx.storage.get(&first.file_path).await.unwrap().len(), 13);
    }

    #[tokio::test]
    async fn test_rejects_disallowed_and_empty() {
        let fx = fixture().await;
        let (department, _) = fx.department("Finance").await;
        let folder = fx.folder(&department, "Budgets").await;
        let ident = folder.slug.clone();

        let err = fx
            .services
            .uploads
            .upload(&fx.ctx, FolderRef::new(&ident), input("run.sh", "application/x-sh", b"#!/bin/sh"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(err.details.unwrap().get("file").is_some());

        let err = fx
            .services
            .uploads
            .upload(&fx.ctx, FolderRef::new(&ident), input("empty.pdf", "application/pdf", b""))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        assert!(fx.services.files.list(FolderRef::new(&ident)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mime_falls_back_to_extension() {
        let fx = fixture().await;
        let (department, _) = fx.department("Design").await;
        let folder = fx.folder(&department, "Mockups").await;

        let file = fx
            .services
            .uploads
            .upload(
                &fx.ctx,
                FolderRef::new(&folder.slug),
                input("screen.png", "application/octet-stream", b"\x89PNG"),
            )
            .await
            .unwrap();
        assert_eq!(file.file_type, "image/png");
    }

    #[tokio::test]
    async fn test_upload_into_archived_folder_is_not_found() {
        let fx = fixture().await;
        let (department, _) = fx.department("Finance").await;
        let folder = fx.folder(&department, "Old").await;
        fx.services.archive.archive_folder(&fx.ctx, folder.id).await.unwrap();

        let err = fx
            .services
            .uploads
            .upload(&fx.ctx, FolderRef::new(&folder.id.to_string()), input("a.pdf", "application/pdf", b"%PDF"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("C:\\Users\\me\\report.pdf"), "report.pdf");
        assert_eq!(base_name("a/b/c.docx"), "c.docx");
        assert_eq!(base_name("plain.png"), "plain.png");
    }
}
