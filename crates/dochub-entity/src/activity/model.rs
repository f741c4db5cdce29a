//! Activity entity model.

use chrono::{DateTime, Utc};
use dochub_core::types::{ActivityId, DepartmentId, FolderId};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::ActivityStatus;
use crate::item::ItemType;

/// An append-only record of something that happened to a folder or file.
///
/// References are plain ids without foreign keys, so they may dangle after
/// a department is deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Activity {
    /// Unique activity identifier.
    pub id: ActivityId,
    /// Department the item belonged to.
    pub department_id: Option<DepartmentId>,
    /// Folder the item was (or is) in.
    pub folder_id: Option<FolderId>,
    /// Item name at the time of the event.
    pub item_name: String,
    /// Folder or file.
    #[serde(rename = "type")]
    pub item_type: ItemType,
    /// What happened.
    pub status: ActivityStatus,
    /// When the event was recorded.
    pub created_at: DateTime<Utc>,
}

/// Data required to append an activity.
#[derive(Debug, Clone)]
pub struct NewActivity {
    /// Department context.
    pub department_id: Option<DepartmentId>,
    /// Folder context.
    pub folder_id: Option<FolderId>,
    /// Item name at event time.
    pub item_name: String,
    /// Folder or file.
    pub item_type: ItemType,
    /// What happened.
    pub status: ActivityStatus,
}

/// A feed entry: an activity with its department and folder resolved.
///
/// Resolved fields are null when the referenced row no longer exists.
/// Archived folders still resolve.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityEntry {
    /// The activity itself.
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub activity: Activity,
    /// Name of the referenced department.
    pub department_name: Option<String>,
    /// Slug of the referenced department.
    pub department_slug: Option<String>,
    /// Name of the referenced folder.
    pub folder_name: Option<String>,
    /// Slug of the referenced folder.
    pub folder_slug: Option<String>,
}
