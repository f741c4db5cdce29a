//! Activity feed configuration.

use serde::{Deserialize, Serialize};

/// Limits applied to the activity feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConfig {
    /// Entries returned when the caller gives no limit.
    #[serde(default = "default_feed_limit")]
    pub default_feed_limit: usize,
    /// Hard cap on a requested limit.
    #[serde(default = "default_max_feed_limit")]
    pub max_feed_limit: usize,
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            default_feed_limit: default_feed_limit(),
            max_feed_limit: default_max_feed_limit(),
        }
    }
}

fn default_feed_limit() -> usize {
    50
}

fn default_max_feed_limit() -> usize {
    500
}
