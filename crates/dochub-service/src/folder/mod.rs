//! Folder operations.

pub mod service;

pub use service::{FolderInput, FolderService};
