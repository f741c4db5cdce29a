//! Route handlers organized by domain.

pub mod activity;
pub mod archive;
pub mod department;
pub mod file;
pub mod folder;
pub mod health;
