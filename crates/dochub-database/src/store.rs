//! Persistence traits shared by the PostgreSQL and in-memory backends.
//!
//! State-sensitive mutations (rename, archive, restore) are conditional on
//! the row's current state and report a mismatch as `NotFound`, so callers
//! never act on a stale read.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use dochub_core::result::AppResult;
use dochub_core::types::{DepartmentId, FileId, FolderId};
use dochub_entity::activity::{Activity, ActivityEntry, NewActivity};
use dochub_entity::archive::{ArchivedFileRow, ArchivedFolderRow};
use dochub_entity::department::{Department, DepartmentChanges, NewDepartment};
use dochub_entity::file::{File, NewFile};
use dochub_entity::folder::{Folder, NewFolder};

/// Department persistence.
#[async_trait]
pub trait DepartmentStore: Send + Sync + std::fmt::Debug + 'static {
    /// List departments ordered by name, optionally filtered by a
    /// case-insensitive substring of name, alias, or slug.
    async fn list(&self, query: Option<&str>) -> AppResult<Vec<Department>>;

    /// Find a department by ID.
    async fn find_by_id(&self, id: DepartmentId) -> AppResult<Option<Department>>;

    /// Find a department by slug.
    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Department>>;

    /// The department whose image is stored under `key`, if any.
    async fn find_by_image(&self, key: &str) -> AppResult<Option<Department>>;

    /// Every department slug currently in use.
    async fn slugs(&self) -> AppResult<Vec<String>>;

    /// Insert a department together with its root folder, atomically.
    ///
    /// Fails with `Validation` when the name is taken and `Conflict` when
    /// the slug is.
    async fn create_with_root_folder(
        &self,
        data: &NewDepartment,
        root_folder_slug: &str,
    ) -> AppResult<(Department, Folder)>;

    /// Replace name, alias, and optionally the image. The slug is kept.
    async fn update(&self, id: DepartmentId, changes: &DepartmentChanges)
    -> AppResult<Department>;

    /// Hard-delete a department and, by cascade, its folders and files.
    ///
    /// Returns the storage keys of every removed file, collected in the same
    /// atomic step as the delete.
    async fn delete(&self, id: DepartmentId) -> AppResult<Vec<String>>;
}

/// Folder persistence.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by ID, active or archived.
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Active folders with the given slug, optionally within one department.
    async fn find_active_by_slug(
        &self,
        slug: &str,
        department_id: Option<DepartmentId>,
    ) -> AppResult<Vec<Folder>>;

    /// Active folders of a department ordered by name, optionally filtered
    /// by a case-insensitive substring of name or description.
    async fn list_active_by_department(
        &self,
        department_id: DepartmentId,
        query: Option<&str>,
    ) -> AppResult<Vec<Folder>>;

    /// Every slug used in a department, including archived folders.
    async fn slugs_in_department(&self, department_id: DepartmentId) -> AppResult<Vec<String>>;

    /// Insert a folder. A taken `(department_id, slug)` pair is `Conflict`.
    async fn create(&self, data: &NewFolder) -> AppResult<Folder>;

    /// Rename an active folder.
    async fn rename(
        &self,
        id: FolderId,
        folder_name: &str,
        description: Option<&str>,
    ) -> AppResult<Folder>;

    /// Archive an active folder and all of its active files with one
    /// timestamp. Returns the folder and the number of files archived.
    async fn archive_with_files(&self, id: FolderId, at: DateTime<Utc>)
    -> AppResult<(Folder, u64)>;

    /// Restore an archived folder. Its files are left as they are.
    async fn restore(&self, id: FolderId) -> AppResult<Folder>;

    /// Archived folders with their department names.
    async fn list_archived(&self) -> AppResult<Vec<ArchivedFolderRow>>;
}

/// File persistence.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a file by ID, active or archived.
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>>;

    /// Active files of a folder, newest first.
    async fn list_active_by_folder(&self, folder_id: FolderId) -> AppResult<Vec<File>>;

    /// Insert a file. Fails with `NotFound` unless the folder is active.
    async fn create(&self, data: &NewFile) -> AppResult<File>;

    /// Rename an active file.
    async fn rename(&self, id: FileId, file_name: &str) -> AppResult<File>;

    /// Archive an active file.
    async fn archive(&self, id: FileId, at: DateTime<Utc>) -> AppResult<File>;

    /// Restore an archived file.
    async fn restore(&self, id: FileId) -> AppResult<File>;

    /// Archived files with their folder and department names.
    async fn list_archived(&self) -> AppResult<Vec<ArchivedFileRow>>;
}

/// Append-only activity log.
#[async_trait]
pub trait ActivityStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append an entry.
    async fn append(&self, data: &NewActivity) -> AppResult<Activity>;

    /// The most recent entries, newest first, with context resolved.
    async fn list_recent(&self, limit: usize) -> AppResult<Vec<ActivityEntry>>;
}

/// Escape `%`, `_` and `\` and wrap the query for an `ILIKE` match.
pub(crate) fn like_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for ch in query.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

/// Trim a search query, treating blank input as absent.
pub(crate) fn normalize_query(query: Option<&str>) -> Option<&str> {
    query.map(str::trim).filter(|q| !q.is_empty())
}
