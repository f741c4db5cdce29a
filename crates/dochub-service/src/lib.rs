//! # dochub-service
//!
//! Business logic for DocHub. Each service orchestrates the persistence
//! stores and the storage manager to implement one group of use cases,
//! and records folder and file events in the activity log.
//!
//! Dependencies are injected at construction time as `Arc` handles.

pub mod activity;
pub mod archive;
pub mod context;
pub mod department;
pub mod file;
pub mod folder;
pub mod services;
pub mod upload_policy;
pub mod validation;

mod lookup;
#[cfg(test)]
mod test_support;

pub use activity::ActivityRecorder;
pub use archive::ArchiveService;
pub use context::RequestContext;
pub use department::{DepartmentInput, DepartmentService};
pub use file::{FileService, UploadInput, UploadService};
pub use folder::{FolderInput, FolderService};
pub use lookup::FolderRef;
pub use services::Services;

/// How many times a create is retried when its derived slug is taken
/// between reading the existing slugs and inserting.
pub const MAX_SLUG_ATTEMPTS: u32 = 5;
