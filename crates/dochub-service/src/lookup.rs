//! Resolution of path identifiers (id or slug) to rows.

use std::str::FromStr;

use dochub_core::error::AppError;
use dochub_core::result::AppResult;
use dochub_core::types::{DepartmentId, FolderId};
use dochub_database::store::{DepartmentStore, FolderStore};
use dochub_entity::department::Department;
use dochub_entity::folder::Folder;

/// A folder path segment (UUID or slug), optionally narrowed to one
/// department (UUID or slug).
#[derive(Debug, Clone, Copy)]
pub struct FolderRef<'a> {
    /// Folder UUID or slug.
    pub ident: &'a str,
    /// Department UUID or slug.
    pub department: Option<&'a str>,
}

impl<'a> FolderRef<'a> {
    /// Refer to a folder by UUID or slug alone.
    pub fn new(ident: &'a str) -> Self {
        Self {
            ident,
            department: None,
        }
    }

    /// Narrow the lookup to one department.
    pub fn in_department(mut self, department: Option<&'a str>) -> Self {
        self.department = department;
        self
    }
}

/// Find a department by UUID or slug.
pub(crate) async fn department(
    store: &dyn DepartmentStore,
    ident: &str,
) -> AppResult<Department> {
    let found = match DepartmentId::from_str(ident) {
        Ok(id) => store.find_by_id(id).await?,
        Err(_) => store.find_by_slug(ident).await?,
    };
    found.ok_or_else(|| AppError::not_found(format!("Department '{ident}' not found")))
}

/// Resolve a [`FolderRef`] to an active folder.
pub(crate) async fn folder_ref(
    departments: &dyn DepartmentStore,
    folders: &dyn FolderStore,
    folder: FolderRef<'_>,
) -> AppResult<Folder> {
    let department_id = match folder.department {
        Some(d) => Some(department(departments, d).await?.id),
        None => None,
    };
    active_folder(folders, folder.ident, department_id).await
}

/// Find an active folder by UUID or slug.
///
/// A slug shared by folders in several departments is ambiguous unless
/// `department` narrows it down.
pub(crate) async fn active_folder(
    store: &dyn FolderStore,
    ident: &str,
    department: Option<DepartmentId>,
) -> AppResult<Folder> {
    if let Ok(id) = FolderId::from_str(ident) {
        return store
            .find_by_id(id)
            .await?
            .filter(|f| !f.is_archived())
            .filter(|f| department.is_none_or(|d| f.department_id == d))
            .ok_or_else(|| AppError::not_found(format!("Folder '{ident}' not found")));
    }

    let mut matches = store.find_active_by_slug(ident, department).await?;
    match matches.len() {
        0 => Err(AppError::not_found(format!("Folder '{ident}' not found"))),
        1 => Ok(matches.remove(0)),
        n => Err(AppError::conflict(format!(
            "Folder slug '{ident}' matches {n} departments; pass ?department=<slug> to choose one"
        ))),
    }
}
