//! # dochub-storage
//!
//! Stores uploaded document and department-image bytes. Keys are generated
//! per upload, so identical client file names never collide.

pub mod keys;
pub mod manager;
pub mod mime;
pub mod providers;

pub use manager::StorageManager;
