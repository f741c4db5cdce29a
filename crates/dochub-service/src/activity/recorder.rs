//! Appends activity entries and serves the feed.
//!
//! Recording never fails the caller's operation: the mutation has already
//! been committed by the time an entry is written, so a failed append is
//! only logged.

use std::sync::Arc;

use tracing::{debug, warn};

use dochub_core::config::activity::ActivityConfig;
use dochub_core::result::AppResult;
use dochub_database::store::ActivityStore;
use dochub_entity::ItemType;
use dochub_entity::activity::{ActivityEntry, ActivityStatus, NewActivity};
use dochub_entity::file::File;
use dochub_entity::folder::Folder;

use crate::context::RequestContext;

/// Writes and reads the activity log.
#[derive(Debug, Clone)]
pub struct ActivityRecorder {
    store: Arc<dyn ActivityStore>,
    config: ActivityConfig,
}

impl ActivityRecorder {
    /// Creates a new activity recorder.
    pub fn new(store: Arc<dyn ActivityStore>, config: ActivityConfig) -> Self {
        Self { store, config }
    }

    /// Append an entry, logging instead of returning any failure.
    pub async fn record(&self, ctx: &RequestContext, entry: NewActivity) {
        match self.store.append(&entry).await {
            Ok(activity) => debug!(
                request_id = %ctx.request_id,
                activity_id = %activity.id,
                item_type = %activity.item_type,
                status = %activity.status,
                "Activity recorded"
            ),
            Err(e) => warn!(
                request_id = %ctx.request_id,
                item_name = %entry.item_name,
                item_type = %entry.item_type,
                status = %entry.status,
                error = %e,
                "Failed to record activity"
            ),
        }
    }

    /// Record an event about a folder.
    pub async fn folder_event(&self, ctx: &RequestContext, folder: &Folder, status: ActivityStatus) {
        self.record(
            ctx,
            NewActivity {
                department_id: Some(folder.department_id),
                folder_id: Some(folder.id),
                item_name: folder.folder_name.clone(),
                item_type: ItemType::Folder,
                status,
            },
        )
        .await;
    }

    /// Record an event about a file. `folder` supplies the department and
    /// may be absent if it could not be loaded.
    pub async fn file_event(
        &self,
        ctx: &RequestContext,
        file: &File,
        folder: Option<&Folder>,
        status: ActivityStatus,
    ) {
        self.record(
            ctx,
            NewActivity {
                department_id: folder.map(|f| f.department_id),
                folder_id: Some(file.folder_id),
                item_name: file.file_name.clone(),
                item_type: ItemType::File,
                status,
            },
        )
        .await;
    }

    /// Most recent entries, newest first.
    ///
    /// `None` uses the configured default; larger requests are capped and
    /// a limit of zero returns nothing.
    pub async fn list_recent(&self, limit: Option<usize>) -> AppResult<Vec<ActivityEntry>> {
        let limit = limit
            .unwrap_or(self.config.default_feed_limit)
            .min(self.config.max_feed_limit);
        if limit == 0 {
            return Ok(Vec::new());
        }
        self.store.list_recent(limit).await
    }
}
