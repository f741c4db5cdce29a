//! # dochub-entity
//!
//! Domain entity models for DocHub. Every struct in this crate represents a
//! database table row, an insert payload, or a read model assembled from
//! several tables. Row types additionally derive `sqlx::FromRow`.

pub mod activity;
pub mod archive;
pub mod department;
pub mod file;
pub mod folder;
pub mod item;

pub use item::ItemType;
