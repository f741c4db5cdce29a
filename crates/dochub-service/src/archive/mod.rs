//! Soft delete, the archive view, and restore.

pub mod service;

pub use service::ArchiveService;
