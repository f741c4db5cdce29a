//! Department entity model.

use chrono::{DateTime, Utc};
use dochub_core::types::DepartmentId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A top-level organizational unit that owns folders.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Department {
    /// Unique department identifier.
    pub id: DepartmentId,
    /// Display name, unique across departments.
    pub name: String,
    /// Short alias (e.g. `FIN`).
    pub alias: String,
    /// URL-safe slug derived from the name at creation.
    pub slug: String,
    /// Storage key of the department image, if one was uploaded.
    pub image: Option<String>,
    /// When the department was created.
    pub created_at: DateTime<Utc>,
    /// When the department was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Department {
    /// Case-insensitive match against name, alias, or slug.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.alias.to_lowercase().contains(&query)
            || self.slug.contains(&query)
    }
}

/// Data required to create a department.
#[derive(Debug, Clone)]
pub struct NewDepartment {
    /// Display name.
    pub name: String,
    /// Short alias.
    pub alias: String,
    /// Pre-assigned slug.
    pub slug: String,
    /// Storage key of an already-written image.
    pub image: Option<String>,
}

/// Fields replaced by a department update. The slug is never part of it.
#[derive(Debug, Clone)]
pub struct DepartmentChanges {
    /// New display name.
    pub name: String,
    /// New alias.
    pub alias: String,
    /// `Some(key)` replaces the image; `None` keeps the current one.
    pub image: Option<String>,
}
