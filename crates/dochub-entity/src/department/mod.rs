//! Department domain entities.

pub mod image;
pub mod model;

pub use image::DepartmentImage;
pub use model::{Department, DepartmentChanges, NewDepartment};
