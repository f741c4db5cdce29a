//! Wiring of every service from the stores, storage, and configuration.

use std::sync::Arc;

use dochub_core::config::AppConfig;
use dochub_database::Stores;
use dochub_storage::StorageManager;

use crate::activity::ActivityRecorder;
use crate::archive::ArchiveService;
use crate::department::DepartmentService;
use crate::file::{FileService, UploadService};
use crate::folder::FolderService;

/// All services, sharing one set of stores and one storage manager.
#[derive(Debug, Clone)]
pub struct Services {
    /// Department administration.
    pub departments: DepartmentService,
    /// Folder management.
    pub folders: FolderService,
    /// File listing and rename.
    pub files: FileService,
    /// Document upload.
    pub uploads: UploadService,
    /// Archive and restore.
    pub archive: ArchiveService,
    /// Activity feed.
    pub activity: ActivityRecorder,
}

impl Services {
    /// Build every service.
    pub fn new(stores: &Stores, storage: Arc<StorageManager>, config: &AppConfig) -> Self {
        let activity = ActivityRecorder::new(stores.activities.clone(), config.activity.clone());

        Self {
            departments: DepartmentService::new(
                stores.departments.clone(),
                storage.clone(),
                config.upload.images.clone(),
            ),
            folders: FolderService::new(
                stores.departments.clone(),
                stores.folders.clone(),
                activity.clone(),
            ),
            files: FileService::new(
                stores.departments.clone(),
                stores.folders.clone(),
                stores.files.clone(),
                storage.clone(),
                activity.clone(),
            ),
            uploads: UploadService::new(
                stores.departments.clone(),
                stores.folders.clone(),
                stores.files.clone(),
                storage,
                config.upload.files.clone(),
                activity.clone(),
            ),
            archive: ArchiveService::new(
                stores.folders.clone(),
                stores.files.clone(),
                activity.clone(),
            ),
            activity,
        }
    }
}
