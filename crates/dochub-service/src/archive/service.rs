//! Archive engine.
//!
//! `ACTIVE --archive--> ARCHIVED --restore--> ACTIVE`. Archiving a folder
//! takes its active files with it under the same timestamp; restoring a
//! folder brings back the folder alone.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_core::types::{FileId, FolderId};
use dochub_database::store::{FileStore, FolderStore};
use dochub_entity::ItemType;
use dochub_entity::activity::ActivityStatus;
use dochub_entity::archive::ArchivedItem;
use dochub_entity::file::File;
use dochub_entity::folder::Folder;

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;

/// Note returned alongside a restored folder.
pub const FOLDER_RESTORE_NOTE: &str =
    "Its contents remain archived and must be restored individually.";

/// Moves folders and files in and out of the archive.
#[derive(Debug, Clone)]
pub struct ArchiveService {
    folders: Arc<dyn FolderStore>,
    files: Arc<dyn FileStore>,
    activity: ActivityRecorder,
}

impl ArchiveService {
    /// Creates a new archive service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        activity: ActivityRecorder,
    ) -> Self {
        Self {
            folders,
            files,
            activity,
        }
    }

    /// Archive an active folder and its active files.
    pub async fn archive_folder(&self, ctx: &RequestContext, id: FolderId) -> AppResult<Folder> {
        let (folder, files_archived) = self.folders.archive_with_files(id, Utc::now()).await?;

        info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_name(),
            folder_id = %folder.id,
            files_archived,
            "Folder archived"
        );

        self.activity
            .folder_event(ctx, &folder, ActivityStatus::Deleted)
            .await;
        Ok(folder)
    }

    /// Archive an active file.
    pub async fn archive_file(&self, ctx: &RequestContext, id: FileId) -> AppResult<File> {
        let file = self.files.archive(id, Utc::now()).await?;

        info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_name(),
            file_id = %file.id,
            "File archived"
        );

        let folder = self.folder_of(&file).await;
        self.activity
            .file_event(ctx, &file, folder.as_ref(), ActivityStatus::Deleted)
            .await;
        Ok(file)
    }

    /// Archived folders and files, most recently archived first.
    pub async fn list_archived(&self) -> AppResult<Vec<ArchivedItem>> {
        let folders = self.folders.list_archived().await?;
        let files = self.files.list_archived().await?;

        let mut items: Vec<ArchivedItem> = folders
            .into_iter()
            .map(ArchivedItem::from)
            .chain(files.into_iter().map(ArchivedItem::from))
            .collect();
        items.sort_by(|a, b| b.archived_at.cmp(&a.archived_at));
        Ok(items)
    }

    /// Restore an archived folder. Its files stay archived.
    pub async fn restore_folder(&self, ctx: &RequestContext, id: FolderId) -> AppResult<Folder> {
        let folder = self.folders.restore(id).await?;

        info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_name(),
            folder_id = %folder.id,
            "Folder restored"
        );

        self.activity
            .folder_event(ctx, &folder, ActivityStatus::Restored)
            .await;
        Ok(folder)
    }

    /// Restore an archived file, even when its folder is still archived.
    pub async fn restore_file(&self, ctx: &RequestContext, id: FileId) -> AppResult<File> {
        let file = self.files.restore(id).await?;

        info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_name(),
            file_id = %file.id,
            "File restored"
        );

        let folder = self.folder_of(&file).await;
        self.activity
            .file_event(ctx, &file, folder.as_ref(), ActivityStatus::Restored)
            .await;
        Ok(file)
    }

    /// Permanent deletion is not offered. Fails with `NotFound` when no
    /// archived item matches, and `NotImplemented` otherwise.
    pub async fn delete_permanently(&self, item_type: ItemType, id: Uuid) -> AppResult<()> {
        let archived = match item_type {
            ItemType::Folder => self
                .folders
                .find_by_id(FolderId::from_uuid(id))
                .await?
                .is_some_and(|f| f.is_archived()),
            ItemType::File => self
                .files
                .find_by_id(FileId::from_uuid(id))
                .await?
                .is_some_and(|f| f.is_archived()),
        };

        if !archived {
            return Err(AppError::not_found(format!(
                "No archived {item_type} with id {id}"
            )));
        }
        Err(AppError::not_implemented(
            "Permanent deletion is not available; archived items can only be restored",
        ))
    }

    /// The file's folder, for activity context. Lookup failures are ignored.
    async fn folder_of(&self, file: &File) -> Option<Folder> {
        self.folders.find_by_id(file.folder_id).await.ok().flatten()
    }
}
