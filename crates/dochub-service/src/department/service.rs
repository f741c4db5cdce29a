//! Department administration.
//!
//! Department changes are not written to the activity log, and neither is
//! the root folder created alongside a new department.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use dochub_core::config::upload::UploadPolicy;
use dochub_core::error::{AppError, ErrorKind};
use dochub_core::result::AppResult;
use dochub_core::slug::derive_slug;
use dochub_core::types::DepartmentId;
use dochub_database::store::DepartmentStore;
use dochub_entity::department::{Department, DepartmentChanges, DepartmentImage, NewDepartment};
use dochub_entity::folder::Folder;
use dochub_storage::StorageManager;
use dochub_storage::keys::{DEPARTMENT_IMAGES_PREFIX, object_key};
use dochub_storage::mime::resolve_mime;

use crate::context::RequestContext;
use crate::lookup;
use crate::upload_policy::check_upload;
use crate::validation::{optional_name, required_name};
use crate::MAX_SLUG_ATTEMPTS;

/// Input for creating or updating a department.
#[derive(Debug, Clone, Default)]
pub struct DepartmentInput {
    /// Display name.
    pub name: String,
    /// Short alias. May be blank.
    pub alias: String,
    /// Image to attach. `Unset` keeps the current image on update.
    pub image: DepartmentImage,
}

/// An image key, and whether this request wrote the bytes.
#[derive(Debug, Clone)]
struct StoredImage {
    key: String,
    written: bool,
}

/// Manages departments and their stored images.
#[derive(Debug, Clone)]
pub struct DepartmentService {
    departments: Arc<dyn DepartmentStore>,
    storage: Arc<StorageManager>,
    image_policy: UploadPolicy,
}

impl DepartmentService {
    /// Creates a new department service.
    pub fn new(
        departments: Arc<dyn DepartmentStore>,
        storage: Arc<StorageManager>,
        image_policy: UploadPolicy,
    ) -> Self {
        Self {
            departments,
            storage,
            image_policy,
        }
    }

    /// Lists departments, optionally filtered by `query`.
    pub async fn list(&self, query: Option<&str>) -> AppResult<Vec<Department>> {
        self.departments.list(query).await
    }

    /// Gets a department by UUID or slug.
    pub async fn get(&self, ident: &str) -> AppResult<Department> {
        lookup::department(self.departments.as_ref(), ident).await
    }

    /// Creates a department together with its root folder.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: DepartmentInput,
    ) -> AppResult<(Department, Folder)> {
        let name = required_name("name", "name", &input.name)?;
        let alias = optional_name("alias", "alias", &input.alias)?;
        let image = self.store_image(input.image, None).await?;
        let image_key = image.as_ref().map(|i| i.key.clone());

        let root_folder_slug = derive_slug::<&str>(&name, "folder", &[]);
        let mut attempt = 0;
        let result = loop {
            attempt += 1;
            let taken = match self.departments.slugs().await {
                Ok(taken) => taken,
                Err(e) => break Err(e),
            };
            let data = NewDepartment {
                name: name.clone(),
                alias: alias.clone(),
                slug: derive_slug(&name, "department", &taken),
                image: image_key.clone(),
            };

            match self
                .departments
                .create_with_root_folder(&data, &root_folder_slug)
                .await
            {
                Err(e) if e.is(ErrorKind::Conflict) && attempt < MAX_SLUG_ATTEMPTS => {
                    warn!(slug = %data.slug, attempt, "Department slug taken concurrently, retrying");
                }
                other => break other,
            }
        };

        let (department, root_folder) = match result {
            Ok(created) => created,
            Err(e) => {
                self.discard_written(image.as_ref()).await;
                return Err(e);
            }
        };

        info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_name(),
            department_id = %department.id,
            slug = %department.slug,
            root_folder_id = %root_folder.id,
            "Department created"
        );

        Ok((department, root_folder))
    }

    /// Updates name, alias, and optionally the image. The slug is kept.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: DepartmentId,
        input: DepartmentInput,
    ) -> AppResult<Department> {
        let name = required_name("name", "name", &input.name)?;
        let alias = optional_name("alias", "alias", &input.alias)?;

        let existing = self
            .departments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Department {id} not found")))?;

        let image = self.store_image(input.image, Some(id)).await?;
        let changes = DepartmentChanges {
            name,
            alias,
            image: image.as_ref().map(|i| i.key.clone()),
        };

        let department = match self.departments.update(id, &changes).await {
            Ok(department) => department,
            Err(e) => {
                self.discard_written(image.as_ref()).await;
                return Err(e);
            }
        };

        if let (Some(old), Some(new)) = (existing.image.as_deref(), image.as_ref()) {
            if old != new.key {
                self.storage.delete_quietly([old]).await;
            }
        }

        info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_name(),
            department_id = %department.id,
            "Department updated"
        );

        Ok(department)
    }

    /// Hard-deletes a department with all folders and files, then removes
    /// their stored bytes and the department image.
    pub async fn delete(&self, ctx: &RequestContext, id: DepartmentId) -> AppResult<()> {
        let department = self
            .departments
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Department {id} not found")))?;

        let mut paths = self.departments.delete(id).await?;

        paths.extend(department.image.clone());
        let failed = self.storage.delete_quietly(&paths).await;

        info!(
            request_id = %ctx.request_id,
            actor = %ctx.actor_name(),
            department_id = %id,
            removed_objects = paths.len() - failed,
            "Department deleted"
        );

        Ok(())
    }

    /// Public URL of a department image key.
    pub fn image_url(&self, department: &Department) -> Option<String> {
        department
            .image
            .as_deref()
            .map(|key| self.storage.public_url(key))
    }

    /// Resolve an image to a stored key, writing pending bytes.
    ///
    /// A stored key must be a department image that no department other
    /// than `owner` uses, so deleting or replacing it never touches bytes
    /// that belong to a file or to another department.
    async fn store_image(
        &self,
        image: DepartmentImage,
        owner: Option<DepartmentId>,
    ) -> AppResult<Option<StoredImage>> {
        match image {
            DepartmentImage::Unset => Ok(None),
            DepartmentImage::StoredPath(key) => {
                if !is_department_image_key(&key) {
                    return Err(AppError::validation_field(
                        "image",
                        format!("The stored image '{key}' is not a department image."),
                    ));
                }
                if let Some(other) = self.departments.find_by_image(&key).await? {
                    if Some(other.id) != owner {
                        return Err(AppError::validation_field(
                            "image",
                            format!(
                                "The stored image '{key}' belongs to department '{}'.",
                                other.name
                            ),
                        ));
                    }
                }
                if !self.storage.exists(&key).await? {
                    return Err(AppError::validation_field(
                        "image",
                        format!("The stored image '{key}' does not exist."),
                    ));
                }
                Ok(Some(StoredImage {
                    key,
                    written: false,
                }))
            }
            DepartmentImage::PendingUpload {
                bytes,
                file_name,
                content_type,
            } => self.write_image(bytes, &file_name, content_type.as_deref()).await,
        }
    }

    async fn write_image(
        &self,
        bytes: Bytes,
        file_name: &str,
        content_type: Option<&str>,
    ) -> AppResult<Option<StoredImage>> {
        let mime = resolve_mime(content_type, file_name);
        check_upload(&self.image_policy, "image", &bytes, mime.as_deref())?;

        let key = object_key(DEPARTMENT_IMAGES_PREFIX, file_name);
        self.storage.put(&key, bytes).await?;
        Ok(Some(StoredImage { key, written: true }))
    }

    /// Remove an image this request wrote, after a failed database write.
    async fn discard_written(&self, image: Option<&StoredImage>) {
        if let Some(image) = image.filter(|i| i.written) {
            self.storage.delete_quietly([image.key.as_str()]).await;
        }
    }
}

/// Whether `key` names an object directly under the department image prefix.
fn is_department_image_key(key: &str) -> bool {
    key.strip_prefix(DEPARTMENT_IMAGES_PREFIX)
        .and_then(|rest| rest.strip_prefix('/'))
        .is_some_and(|name| !name.is_empty() && !name.contains(['/', '\\']))
}
