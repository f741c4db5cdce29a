//! # dochub-database
//!
//! Store traits for departments, folders, files, and the activity log, with
//! a PostgreSQL implementation (sqlx) and a process-local implementation.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;
pub mod stores;

pub use connection::DatabasePool;
pub use store::{ActivityStore, DepartmentStore, FileStore, FolderStore};
pub use stores::Stores;
