//! PostgreSQL repository implementations of the store traits.

pub mod activity;
pub mod department;
pub mod file;
pub mod folder;

pub use activity::ActivityRepository;
pub use department::DepartmentRepository;
pub use file::FileRepository;
pub use folder::FolderRepository;
