//! File listing and rename within a folder.

use std::sync::Arc;

use tracing::info;

use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_core::types::FileId;
use dochub_database::store::{DepartmentStore, FileStore, FolderStore};
use dochub_entity::activity::ActivityStatus;
use dochub_entity::file::File;
use dochub_entity::folder::Folder;
use dochub_storage::StorageManager;

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;
use crate::lookup::{self, FolderRef};
use crate::validation::required_name;

/// Reads and renames files.
#[derive(Debug, Clone)]
pub struct FileService {
    departments: Arc<dyn DepartmentStore>,
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    storage: Arc<StorageManager>,
    activity: ActivityRecorder,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        departments: Arc<dyn DepartmentStore>,
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        storage: Arc<StorageManager>,
        activity: ActivityRecorder,
    ) -> Self {
        Self {
            departments,
            folders,
            files,
            storage,
            activity,
        }
    }

    /// Lists the active files of an active folder.
    pub async fn list(&self, folder: FolderRef<'_>) -> AppResult<Vec<File>> {
        let folder = self.folder(folder).await?;
        self.files.list_active_by_folder(folder.id).await
    }

    /// Finds an active file that belongs to the given active folder.
    pub async fn find_in_folder(
        &self,
        folder: FolderRef<'_>,
        file_id: FileId,
    ) -> AppResult<(Folder, File)> {
        let folder = self.folder(folder).await?;
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .filter(|f| f.folder_id == folder.id && !f.is_archived())
            .ok_or_else(|| {
                AppError::not_found(format!("File {file_id} not found in folder '{}'", folder.slug))
            })?;
        Ok((folder, file))
    }

    /// Renames an active file inside the given folder.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        folder: FolderRef<'_>,
        file_id: FileId,
        file_name: &str,
    ) -> AppResult<File> {
        let file_name = required_name("fileName", "file name", file_name)?;
        let (folder, _) = self.find_in_folder(folder, file_id).await?;

        let file = self.files.rename(file_id, &file_name).await?;

        info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_name(),
            file_id = %file.id,
            folder_id = %folder.id,
            "File renamed"
        );

        self.activity
            .file_event(ctx, &file, Some(&folder), ActivityStatus::Renamed)
            .await;
        Ok(file)
    }

    async fn folder(&self, folder: FolderRef<'_>) -> AppResult<Folder> {
        lookup::folder_ref(self.departments.as_ref(), self.folders.as_ref(), folder).await
    }

    /// Public URL of a file's stored bytes.
    pub fn url(&self, file: &File) -> String {
        self.storage.public_url(&file.file_path)
    }
}

#[cfg(test)]
mod tests {
    use dochub_core::error::ErrorKind;
    use dochub_entity::activity::ActivityStatus;

    use crate::FolderRef;
    use crate::test_support::fixture;

    #[tokio::test]
    async fn test_rename_within_folder() {
        let fx = fixture().await;
        let (department, _) = fx.department("Marketing").await;
        let folder = fx.folder(&department, "Campaigns").await;
        let file = fx.pdf(&folder, "draft.pdf").await;

        let renamed = fx
            .services
            .files
            .rename(&fx.ctx, FolderRef::new(&folder.slug), file.id, "  final.pdf ")
            .await
            .unwrap();
        assert_eq!(renamed.file_name, "final.pdf");
        assert_eq!(renamed.file_path, file.file_path);

        let feed = fx.services.activity.list_recent(Some(1)).await.unwrap();
        assert_eq!(feed[0].activity.status, ActivityStatus::Renamed);
        assert_eq!(feed[0].activity.item_name, "final.pdf");
        assert_eq!(feed[0].department_name.as_deref(), Some("Marketing"));
    }

    #[tokio::test]
    async fn test_rename_rejects_other_folder_and_blank_name() {
        let fx = fixture().await;
        let (department, _) = fx.department("Marketing").await;
        let campaigns = fx.folder(&department, "Campaigns").await;
        let brand = fx.folder(&department, "Brand").await;
        let file = fx.pdf(&campaigns, "logo.pdf").await;

        let err = fx
            .services
            .files
            .rename(&fx.ctx, FolderRef::new(&brand.slug), file.id, "moved.pdf")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = fx
            .services
            .files
            .rename(&fx.ctx, FolderRef::new(&campaigns.slug), file.id, "   ")
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let long = "x".repeat(256);
        let err = fx
            .services
            .files
            .rename(&fx.ctx, FolderRef::new(&campaigns.slug), file.id, &long)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_list_newest_first_and_url() {
        let fx = fixture().await;
        let (department, _) = fx.department("Marketing").await;
        let folder = fx.folder(&department, "Campaigns").await;
        let older = fx.pdf(&folder, "one.pdf").await;
        let newer = fx.pdf(&folder, "two.pdf").await;

        let files = fx.services.files.list(FolderRef::new(&folder.slug)).await.unwrap();
        let ids: Vec<_> = files.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);
        assert_eq!(
            fx.services.files.url(&older),
            format!("/storage/{}", older.file_path)
        );
    }
}
