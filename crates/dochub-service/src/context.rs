//! Request context passed explicitly into every mutating service call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who is acting, and from where.
///
/// There is no authentication layer; `actor` is whatever the caller
/// identified itself as (the `X-Actor` header, or the CLI user).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Correlation id for logs.
    pub request_id: String,
    /// Self-reported actor name, if any.
    pub actor: Option<String>,
    /// IP address of the request origin.
    pub ip_address: String,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(
        request_id: impl Into<String>,
        actor: Option<String>,
        ip_address: impl Into<String>,
        user_agent: Option<String>,
    ) -> Self {
        Self {
            request_id: request_id.into(),
            actor,
            ip_address: ip_address.into(),
            user_agent,
            request_time: Utc::now(),
        }
    }

    /// Context for work started outside HTTP (CLI, seeding, tests).
    pub fn system(actor: &str) -> Self {
        Self::new(Uuid::new_v4().to_string(), Some(actor.to_string()), "local", None)
    }

    /// Actor name for logging.
    pub fn actor_name(&self) -> &str {
        self.actor.as_deref().unwrap_or("anonymous")
    }
}
