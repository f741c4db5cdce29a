//! Archive read models.

pub mod model;

pub use model::{ArchivedFileRow, ArchivedFolderRow, ArchivedItem, ArchivedMetadata};
