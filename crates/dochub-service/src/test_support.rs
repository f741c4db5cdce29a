//! In-memory fixture shared by service tests.

use std::sync::Arc;

use bytes::Bytes;
use tempfile::TempDir;

use dochub_core::config::AppConfig;
use dochub_core::config::storage::{LocalStorageConfig, StorageConfig};
use dochub_database::Stores;
use dochub_entity::department::Department;
use dochub_entity::file::File;
use dochub_entity::folder::Folder;
use dochub_storage::StorageManager;

use crate::context::RequestContext;
use crate::department::DepartmentInput;
use crate::file::UploadInput;
use crate::folder::FolderInput;
use crate::lookup::FolderRef;
use crate::services::Services;

pub(crate) struct Fixture {
    pub services: Services,
    pub stores: Stores,
    pub storage: Arc<StorageManager>,
    pub ctx: RequestContext,
    _dir: TempDir,
}

pub(crate) async fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        storage: StorageConfig {
            local: LocalStorageConfig {
                root_path: dir.path().to_string_lossy().to_string(),
            },
            ..Default::default()
        },
        ..Default::default()
    };
    let stores = Stores::in_memory();
    let storage = Arc::new(StorageManager::from_config(&config.storage).await.unwrap());
    let services = Services::new(&stores, storage.clone(), &config);

    Fixture {
        services,
        stores,
        storage,
        ctx: RequestContext::system("tester"),
        _dir: dir,
    }
}

impl Fixture {
    pub async fn department(&self, name: &str) -> (Department, Folder) {
        let input = DepartmentInput {
            name: name.to_string(),
            alias: name.chars().take(3).collect(),
            ..Default::default()
        };
        self.services
            .departments
            .create(&self.ctx, input)
            .await
            .unwrap()
    }

    pub async fn folder(&self, department: &Department, name: &str) -> Folder {
        let input = FolderInput {
            folder_name: name.to_string(),
            description: None,
        };
        self.services
            .folders
            .create(&self.ctx, &department.slug, input)
            .await
            .unwrap()
    }

    pub async fn pdf(&self, folder: &Folder, name: &str) -> File {
        let input = UploadInput {
            bytes: Bytes::from_static(b"%PDF-1.4 test"),
            file_name: name.to_string(),
            content_type: Some("application/pdf".to_string()),
        };
        self.services
            .uploads
            .upload(&self.ctx, FolderRef::new(&folder.id.to_string()), input)
            .await
            .unwrap()
    }
}
