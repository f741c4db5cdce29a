//! In-memory implementation of every store trait.
//!
//! All tables live behind one `RwLock`, so multi-row operations (department
//! with root folder, folder archive cascade, department delete) are atomic
//! with respect to each other.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_core::types::{ActivityId, DepartmentId, FileId, FolderId};
use dochub_entity::activity::{Activity, ActivityEntry, NewActivity};
use dochub_entity::archive::{ArchivedFileRow, ArchivedFolderRow};
use dochub_entity::department::{Department, DepartmentChanges, NewDepartment};
use dochub_entity::file::{File, NewFile};
use dochub_entity::folder::{Folder, NewFolder};

use crate::store::{ActivityStore, DepartmentStore, FileStore, FolderStore, normalize_query};

#[derive(Debug, Default)]
struct Tables {
    departments: Vec<Department>,
    folders: Vec<Folder>,
    files: Vec<File>,
    activities: Vec<Activity>,
}

impl Tables {
    fn department(&self, id: DepartmentId) -> Option<&Department> {
        self.departments.iter().find(|d| d.id == id)
    }

    fn folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.iter().find(|f| f.id == id)
    }

    fn folder_mut(&mut self, id: FolderId) -> Option<&mut Folder> {
        self.folders.iter_mut().find(|f| f.id == id)
    }

    fn file_mut(&mut self, id: FileId) -> Option<&mut File> {
        self.files.iter_mut().find(|f| f.id == id)
    }

    fn department_name(&self, id: DepartmentId) -> Option<String> {
        self.department(id).map(|d| d.name.clone())
    }
}

/// Shared in-memory tables. Cloning shares the same state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Newest first; ties keep reverse insertion order.
fn newest_first<T: Clone>(rows: impl DoubleEndedIterator<Item = T>, key: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut rows: Vec<T> = rows.rev().collect();
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
    rows
}

#[async_trait]
impl DepartmentStore for MemoryStore {
    async fn list(&self, query: Option<&str>) -> AppResult<Vec<Department>> {
        let tables = self.tables.read().await;
        let query = normalize_query(query);
        let mut departments: Vec<Department> = tables
            .departments
            .iter()
            .filter(|d| query.is_none_or(|q| d.matches(q)))
            .cloned()
            .collect();
        departments.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(departments)
    }

    async fn find_by_id(&self, id: DepartmentId) -> AppResult<Option<Department>> {
        Ok(self.tables.read().await.department(id).cloned())
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Department>> {
        let tables = self.tables.read().await;
        Ok(tables.departments.iter().find(|d| d.slug == slug).cloned())
    }

    async fn find_by_image(&self, key: &str) -> AppResult<Option<Department>> {
        let tables = self.tables.read().await;
        Ok(tables
            .departments
            .iter()
            .find(|d| d.image.as_deref() == Some(key))
            .cloned())
    }

    async fn slugs(&self) -> AppResult<Vec<String>> {
        let tables = self.tables.read().await;
        Ok(tables.departments.iter().map(|d| d.slug.clone()).collect())
    }

    async fn create_with_root_folder(
        &self,
        data: &NewDepartment,
        root_folder_slug: &str,
    ) -> AppResult<(Department, Folder)> {
        let mut tables = self.tables.write().await;

        if tables.departments.iter().any(|d| d.name == data.name) {
            return Err(AppError::validation_field(
                "name",
                format!("The name '{}' has already been taken.", data.name),
            ));
        }
        if tables.departments.iter().any(|d| d.slug == data.slug) {
            return Err(AppError::conflict(format!(
                "Department slug for '{}' is already in use",
                data.name
            )));
        }

        let now = Utc::now();
        let department = Department {
            id: DepartmentId::new(),
            name: data.name.clone(),
            alias: data.alias.clone(),
            slug: data.slug.clone(),
            image: data.image.clone(),
            created_at: now,
            updated_at: now,
        };
        let root_folder = Folder {
            id: FolderId::new(),
            department_id: department.id,
            folder_name: department.name.clone(),
            description: None,
            slug: root_folder_slug.to_string(),
            archived_at: None,
            created_at: now,
            updated_at: now,
        };

        tables.departments.push(department.clone());
        tables.folders.push(root_folder.clone());
        Ok((department, root_folder))
    }

    async fn update(
        &self,
        id: DepartmentId,
        changes: &DepartmentChanges,
    ) -> AppResult<Department> {
        let mut tables = self.tables.write().await;

        if tables
            .departments
            .iter()
            .any(|d| d.id != id && d.name == changes.name)
        {
            return Err(AppError::validation_field(
                "name",
                format!("The name '{}' has already been taken.", changes.name),
            ));
        }

        let department = tables
            .departments
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or_else(|| AppError::not_found(format!("Department {id} not found")))?;

        department.name = changes.name.clone();
        department.alias = changes.alias.clone();
        if let Some(image) = &changes.image {
            department.image = Some(image.clone());
        }
        department.updated_at = Utc::now();
        Ok(department.clone())
    }

    async fn delete(&self, id: DepartmentId) -> AppResult<Vec<String>> {
        let mut tables = self.tables.write().await;

        let before = tables.departments.len();
        tables.departments.retain(|d| d.id != id);
        if tables.departments.len() == before {
            return Err(AppError::not_found(format!("Department {id} not found")));
        }

        let folder_ids: Vec<FolderId> = tables
            .folders
            .iter()
            .filter(|f| f.department_id == id)
            .map(|f| f.id)
            .collect();
        tables.folders.retain(|f| f.department_id != id);

        let (removed, kept): (Vec<File>, Vec<File>) = std::mem::take(&mut tables.files)
            .into_iter()
            .partition(|f| folder_ids.contains(&f.folder_id));
        tables.files = kept;
        Ok(removed.into_iter().map(|f| f.file_path).collect())
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.tables.read().await.folder(id).cloned())
    }

    async fn find_active_by_slug(
        &self,
        slug: &str,
        department_id: Option<DepartmentId>,
    ) -> AppResult<Vec<Folder>> {
        let tables = self.tables.read().await;
        Ok(tables
            .folders
            .iter()
            .filter(|f| f.slug == slug && !f.is_archived())
            .filter(|f| department_id.is_none_or(|d| f.department_id == d))
            .cloned()
            .collect())
    }

    async fn list_active_by_department(
        &self,
        department_id: DepartmentId,
        query: Option<&str>,
    ) -> AppResult<Vec<Folder>> {
        let tables = self.tables.read().await;
        let query = normalize_query(query);
        let mut folders: Vec<Folder> = tables
            .folders
            .iter()
            .filter(|f| f.department_id == department_id && !f.is_archived())
            .filter(|f| {
                query.is_none_or(|q| {
                    contains_ci(&f.folder_name, q)
                        || f.description.as_deref().is_some_and(|d| contains_ci(d, q))
                })
            })
            .cloned()
            .collect();
        folders.sort_by(|a, b| a.folder_name.cmp(&b.folder_name));
        Ok(folders)
    }

    async fn slugs_in_department(&self, department_id: DepartmentId) -> AppResult<Vec<String>> {
        let tables = self.tables.read().await;
        Ok(tables
            .folders
            .iter()
            .filter(|f| f.department_id == department_id)
            .map(|f| f.slug.clone())
            .collect())
    }

    async fn create(&self, data: &NewFolder) -> AppResult<Folder> {
        let mut tables = self.tables.write().await;

        if tables.department(data.department_id).is_none() {
            return Err(AppError::not_found(format!(
                "Department {} not found",
                data.department_id
            )));
        }
        if tables
            .folders
            .iter()
            .any(|f| f.department_id == data.department_id && f.slug == data.slug)
        {
            return Err(AppError::conflict(format!(
                "Folder slug '{}' already exists",
                data.slug
            )));
        }

        let now = Utc::now();
        let folder = Folder {
            id: FolderId::new(),
            department_id: data.department_id,
            folder_name: data.folder_name.clone(),
            description: data.description.clone(),
            slug: data.slug.clone(),
            archived_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.folders.push(folder.clone());
        Ok(folder)
    }

    async fn rename(
        &self,
        id: FolderId,
        folder_name: &str,
        description: Option<&str>,
    ) -> AppResult<Folder> {
        let mut tables = self.tables.write().await;
        let folder = tables
            .folder_mut(id)
            .filter(|f| !f.is_archived())
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;

        folder.folder_name = folder_name.to_string();
        folder.description = description.map(str::to_string);
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn archive_with_files(
        &self,
        id: FolderId,
        at: DateTime<Utc>,
    ) -> AppResult<(Folder, u64)> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        let folder = tables
            .folder_mut(id)
            .filter(|f| !f.is_archived())
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        folder.archived_at = Some(at);
        folder.updated_at = now;
        let folder = folder.clone();

        let mut archived = 0u64;
        for file in tables
            .files
            .iter_mut()
            .filter(|f| f.folder_id == id && !f.is_archived())
        {
            file.archived_at = Some(at);
            file.updated_at = now;
            archived += 1;
        }

        Ok((folder, archived))
    }

    async fn restore(&self, id: FolderId) -> AppResult<Folder> {
        let mut tables = self.tables.write().await;
        let folder = tables
            .folder_mut(id)
            .filter(|f| f.is_archived())
            .ok_or_else(|| AppError::not_found(format!("Archived folder {id} not found")))?;

        folder.archived_at = None;
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn list_archived(&self) -> AppResult<Vec<ArchivedFolderRow>> {
        let tables = self.tables.read().await;
        let rows = tables.folders.iter().filter_map(|f| {
            f.archived_at.map(|archived_at| ArchivedFolderRow {
                id: f.id,
                folder_name: f.folder_name.clone(),
                department_id: f.department_id,
                department_name: tables.department_name(f.department_id),
                archived_at,
            })
        });
        Ok(newest_first(rows.collect::<Vec<_>>().into_iter(), |r| r.archived_at))
    }
}

#[async_trait]
impl FileStore for MemoryStore {
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        let tables = self.tables.read().await;
        Ok(tables.files.iter().find(|f| f.id == id).cloned())
    }

    async fn list_active_by_folder(&self, folder_id: FolderId) -> AppResult<Vec<File>> {
        let tables = self.tables.read().await;
        let files = tables
            .files
            .iter()
            .filter(|f| f.folder_id == folder_id && !f.is_archived())
            .cloned();
        Ok(newest_first(files, |f| f.created_at))
    }

    async fn create(&self, data: &NewFile) -> AppResult<File> {
        let mut tables = self.tables.write().await;

        if !tables
            .folder(data.folder_id)
            .is_some_and(|f| !f.is_archived())
        {
            return Err(AppError::not_found(format!(
                "Folder {} not found",
                data.folder_id
            )));
        }

        let now = Utc::now();
        let file = File {
            id: FileId::new(),
            folder_id: data.folder_id,
            file_name: data.file_name.clone(),
            file_path: data.file_path.clone(),
            file_type: data.file_type.clone(),
            file_size: data.file_size,
            archived_at: None,
            created_at: now,
            updated_at: now,
        };
        tables.files.push(file.clone());
        Ok(file)
    }

    async fn rename(&self, id: FileId, file_name: &str) -> AppResult<File> {
        let mut tables = self.tables.write().await;
        let file = tables
            .file_mut(id)
            .filter(|f| !f.is_archived())
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;

        file.file_name = file_name.to_string();
        file.updated_at = Utc::now();
        Ok(file.clone())
    }

    async fn archive(&self, id: FileId, at: DateTime<Utc>) -> AppResult<File> {
        let mut tables = self.tables.write().await;
        let file = tables
            .file_mut(id)
            .filter(|f| !f.is_archived())
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;

        file.archived_at = Some(at);
        file.updated_at = Utc::now();
        Ok(file.clone())
    }

    async fn restore(&self, id: FileId) -> AppResult<File> {
        let mut tables = self.tables.write().await;
        let file = tables
            .file_mut(id)
            .filter(|f| f.is_archived())
            .ok_or_else(|| AppError::not_found(format!("Archived file {id} not found")))?;

        file.archived_at = None;
        file.updated_at = Utc::now();
        Ok(file.clone())
    }

    async fn list_archived(&self) -> AppResult<Vec<ArchivedFileRow>> {
        let tables = self.tables.read().await;
        let rows: Vec<ArchivedFileRow> = tables
            .files
            .iter()
            .filter_map(|f| {
                let archived_at = f.archived_at?;
                let folder = tables.folder(f.folder_id);
                Some(ArchivedFileRow {
                    id: f.id,
                    file_name: f.file_name.clone(),
                    file_type: f.file_type.clone(),
                    file_size: f.file_size,
                    folder_id: f.folder_id,
                    folder_name: folder.map(|fo| fo.folder_name.clone()),
                    department_name: folder.and_then(|fo| tables.department_name(fo.department_id)),
                    archived_at,
                })
            })
            .collect();
        Ok(newest_first(rows.into_iter(), |r| r.archived_at))
    }
}

#[async_trait]
impl ActivityStore for MemoryStore {
    async fn append(&self, data: &NewActivity) -> AppResult<Activity> {
        let mut tables = self.tables.write().await;
        let activity = Activity {
            id: ActivityId::new(),
            department_id: data.department_id,
            folder_id: data.folder_id,
            item_name: data.item_name.clone(),
            item_type: data.item_type,
            status: data.status,
            created_at: Utc::now(),
        };
        tables.activities.push(activity.clone());
        Ok(activity)
    }

    async fn list_recent(&self, limit: usize) -> AppResult<Vec<ActivityEntry>> {
        let tables = self.tables.read().await;
        let recent = newest_first(tables.activities.iter().cloned(), |a| a.created_at);

        Ok(recent
            .into_iter()
            .take(limit)
            .map(|activity| {
                let department = activity.department_id.and_then(|id| tables.department(id));
                let folder = activity.folder_id.and_then(|id| tables.folder(id));
                ActivityEntry {
                    department_name: department.map(|d| d.name.clone()),
                    department_slug: department.map(|d| d.slug.clone()),
                    folder_name: folder.map(|f| f.folder_name.clone()),
                    folder_slug: folder.map(|f| f.slug.clone()),
                    activity,
                }
            })
            .collect())
    }
}
