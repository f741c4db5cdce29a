//! File listing, rename, and upload.

pub mod service;
pub mod upload;

pub use service::FileService;
pub use upload::{UploadInput, UploadService};
