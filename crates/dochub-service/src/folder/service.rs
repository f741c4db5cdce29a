//! Folder creation, lookup, and rename.

use std::sync::Arc;

use tracing::{info, warn};

use dochub_core::error::ErrorKind;
use dochub_core::result::AppResult;
use dochub_core::slug::derive_slug;
use dochub_core::types::FolderId;
use dochub_database::store::{DepartmentStore, FolderStore};
use dochub_entity::activity::ActivityStatus;
use dochub_entity::folder::{Folder, NewFolder};

use crate::MAX_SLUG_ATTEMPTS;
use crate::activity::ActivityRecorder;
use crate::context::RequestContext;
use crate::lookup::{self, FolderRef};
use crate::validation::{optional_text, required_name};

/// Input for creating or renaming a folder.
#[derive(Debug, Clone, Default)]
pub struct FolderInput {
    /// Display name.
    pub folder_name: String,
    /// Optional description. Blank clears it.
    pub description: Option<String>,
}

/// Manages folders within departments.
#[derive(Debug, Clone)]
pub struct FolderService {
    departments: Arc<dyn DepartmentStore>,
    folders: Arc<dyn FolderStore>,
    activity: ActivityRecorder,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        departments: Arc<dyn DepartmentStore>,
        folders: Arc<dyn FolderStore>,
        activity: ActivityRecorder,
    ) -> Self {
        Self {
            departments,
            folders,
            activity,
        }
    }

    /// Lists the active folders of a department (UUID or slug).
    pub async fn list_by_department(
        &self,
        department: &str,
        query: Option<&str>,
    ) -> AppResult<Vec<Folder>> {
        let department = lookup::department(self.departments.as_ref(), department).await?;
        self.folders
            .list_active_by_department(department.id, query)
            .await
    }

    /// Gets an active folder by UUID or slug.
    ///
    /// `department` (UUID or slug) disambiguates a slug used in more than
    /// one department.
    pub async fn get(&self, ident: &str, department: Option<&str>) -> AppResult<Folder> {
        let folder = FolderRef::new(ident).in_department(department);
        lookup::folder_ref(self.departments.as_ref(), self.folders.as_ref(), folder).await
    }

    /// Creates a folder in a department (UUID or slug).
    ///
    /// The slug is unique within the department, archived folders included.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        department: &str,
        input: FolderInput,
    ) -> AppResult<Folder> {
        let department = lookup::department(self.departments.as_ref(), department).await?;
        let folder_name = required_name("folderName", "folder name", &input.folder_name)?;
        let description = optional_text(input.description.as_deref());

        let mut attempt = 0;
        let folder = loop {
            attempt += 1;
            let taken = self.folders.slugs_in_department(department.id).await?;
            let data = NewFolder {
                department_id: department.id,
                folder_name: folder_name.clone(),
                description: description.clone(),
                slug: derive_slug(&folder_name, "folder", &taken),
            };

            match self.folders.create(&data).await {
                Err(e) if e.is(ErrorKind::Conflict) && attempt < MAX_SLUG_ATTEMPTS => {
                    warn!(slug = %data.slug, attempt, "Folder slug taken concurrently, retrying");
                }
                other => break other?,
            }
        };

        info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_name(),
            department_id = %department.id,
            folder_id = %folder.id,
            slug = %folder.slug,
            "Folder created"
        );

        self.activity
            .folder_event(ctx, &folder, ActivityStatus::Added)
            .await;
        Ok(folder)
    }

    /// Renames an active folder. The slug does not change.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        id: FolderId,
        input: FolderInput,
    ) -> AppResult<Folder> {
        let folder_name = required_name("folderName", "folder name", &input.folder_name)?;
        let description = optional_text(input.description.as_deref());

        let folder = self
            .folders
            .rename(id, &folder_name, description.as_deref())
            .await?;

        info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_name(),
            folder_id = %folder.id,
            "Folder renamed"
        );

        self.activity
            .folder_event(ctx, &folder, ActivityStatus::Renamed)
            .await;
        Ok(folder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use dochub_core::error::ErrorKind;
    use dochub_core::types::DepartmentId;
    use dochub_entity::archive::ArchivedFolderRow;

    use crate::test_support::fixture;

    /// Reports no taken slugs for the first `stale_reads` reads, as if
    /// another request inserted a folder right after the read.
    #[derive(Debug)]
    struct StaleSlugs {
        inner: Arc<dyn FolderStore>,
        stale_reads: AtomicU32,
        creates: AtomicU32,
    }

    impl StaleSlugs {
        fn new(inner: Arc<dyn FolderStore>, stale_reads: u32) -> Self {
            Self {
                inner,
                stale_reads: AtomicU32::new(stale_reads),
                creates: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl FolderStore for StaleSlugs {
        async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
            self.inner.find_by_id(id).await
        }

        async fn find_active_by_slug(
            &self,
            slug: &str,
            department_id: Option<DepartmentId>,
        ) -> AppResult<Vec<Folder>> {
            self.inner.find_active_by_slug(slug, department_id).await
        }

        async fn list_active_by_department(
            &self,
            department_id: DepartmentId,
            query: Option<&str>,
        ) -> AppResult<Vec<Folder>> {
            self.inner.list_active_by_department(department_id, query).await
        }

        async fn slugs_in_department(&self, department_id: DepartmentId) -> AppResult<Vec<String>> {
            let stale = self
                .stale_reads
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if stale {
                return Ok(Vec::new());
            }
            self.inner.slugs_in_department(department_id).await
        }

        async fn create(&self, data: &NewFolder) -> AppResult<Folder> {
            self.creates.fetch_add(1, Ordering::SeqCst);
            self.inner.create(data).await
        }

        async fn rename(
            &self,
            id: FolderId,
            folder_name: &str,
            description: Option<&str>,
        ) -> AppResult<Folder> {
            self.inner.rename(id, folder_name, description).await
        }

        async fn archive_with_files(
            &self,
            id: FolderId,
            at: DateTime<Utc>,
        ) -> AppResult<(Folder, u64)> {
            self.inner.archive_with_files(id, at).await
        }

        async fn restore(&self, id: FolderId) -> AppResult<Folder> {
            self.inner.restore(id).await
        }

        async fn list_archived(&self) -> AppResult<Vec<ArchivedFolderRow>> {
            self.inner.list_archived().await
        }
    }

    fn named(name: &str) -> FolderInput {
        FolderInput {
            folder_name: name.to_string(),
            description: Some("  ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_slug_unique_within_department_including_archived() {
        let fx = fixture().await;
        let (department, root) = fx.department("Reports").await;
        assert_eq!(root.slug, "reports");

        let second = fx.folder(&department, "Reports").await;
        assert_eq!(second.slug, "reports-1");
        assert_eq!(second.description, None);

        fx.services.archive.archive_folder(&fx.ctx, second.id).await.unwrap();
        let third = fx.folder(&department, "Reports").await;
        assert_eq!(third.slug, "reports-2");
    }

    #[tokio::test]
    async fn test_same_slug_in_two_departments_needs_department() {
        let fx = fixture().await;
        let (hr, _) = fx.department("HR").await;
        let (it, _) = fx.department("IT").await;
        let hr_policies = fx.folder(&hr, "Policies").await;
        fx.folder(&it, "Policies").await;

        let err = fx.services.folders.get("policies", None).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);

        let found = fx.services.folders.get("policies", Some("hr")).await.unwrap();
        assert_eq!(found.id, hr_policies.id);
    }

    #[tokio::test]
    async fn test_rename_keeps_slug_and_logs() {
        let fx = fixture().await;
        let (department, _) = fx.department("Reports").await;
        let folder = fx.folder(&department, "Project Alpha").await;
        assert_eq!(folder.slug, "project-alpha");

        let renamed = fx
            .services
            .folders
            .rename(&fx.ctx, folder.id, named("Project Beta"))
            .await
            .unwrap();
        assert_eq!(renamed.folder_name, "Project Beta");
        assert_eq!(renamed.slug, "project-alpha");

        let feed = fx.services.activity.list_recent(None).await.unwrap();
        assert_eq!(feed[0].activity.status, ActivityStatus::Renamed);
        assert_eq!(feed[1].activity.status, ActivityStatus::Added);
    }

    #[tokio::test]
    async fn test_archived_folder_is_hidden_and_not_renamable() {
        let fx = fixture().await;
        let (department, _) = fx.department("Reports").await;
        let folder = fx.folder(&department, "Q1").await;
        fx.services.archive.archive_folder(&fx.ctx, folder.id).await.unwrap();

        let listed = fx
            .services
            .folders
            .list_by_department(&department.slug, None)
            .await
            .unwrap();
        assert!(listed.iter().all(|f| f.id != folder.id));

        let err = fx
            .services
            .folders
            .rename(&fx.ctx, folder.id, named("Q1 final"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_create_requires_name_and_department() {
        let fx = fixture().await;
        let (department, _) = fx.department("Reports").await;

        let err = fx
            .services
            .folders
            .create(&fx.ctx, &department.slug, named(""))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = fx
            .services
            .folders
            .create(&fx.ctx, "nowhere", named("Q2"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_slug_race_retries_with_fresh_slugs() {
        let fx = fixture().await;
        let (department, _) = fx.department("Reports").await;
        let store = Arc::new(StaleSlugs::new(fx.stores.folders.clone(), 1));
        let folders = FolderService::new(
            fx.stores.departments.clone(),
            store.clone(),
            fx.services.activity.clone(),
        );

        let folder = folders
            .create(&fx.ctx, &department.slug, named("Reports"))
            .await
            .unwrap();
        assert_eq!(folder.slug, "reports-1");
        assert_eq!(store.creates.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_slug_race_gives_up_with_conflict() {
        let fx = fixture().await;
        let (department, _) = fx.department("Reports").await;
        let store = Arc::new(StaleSlugs::new(fx.stores.folders.clone(), u32::MAX));
        let folders = FolderService::new(
            fx.stores.departments.clone(),
            store.clone(),
            fx.services.activity.clone(),
        );

        let err = folders
            .create(&fx.ctx, &department.slug, named("Reports"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(store.creates.load(Ordering::SeqCst), MAX_SLUG_ATTEMPTS);
    }
}
