//! `Actor` extractor: builds the request context from headers.
//!
//! There is no authentication. Callers may name themselves with
//! `X-Actor`; the request id comes from `X-Request-Id`, which the logging
//! middleware fills in when the client did not send one.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use dochub_service::RequestContext;

/// Header carrying the request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";
/// Header carrying the caller's self-reported name.
pub const ACTOR_HEADER: &str = "x-actor";

/// Context of the caller, available in handlers.
#[derive(Debug, Clone)]
pub struct Actor(pub RequestContext);

impl std::ops::Deref for Actor {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

fn header(parts: &Parts, name: &str) -> Option<String> {
    parts
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

impl<S: Send + Sync> FromRequestParts<S> for Actor {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let request_id =
            header(parts, REQUEST_ID_HEADER).unwrap_or_else(|| Uuid::new_v4().to_string());
        let ip_address = header(parts, "x-forwarded-for").unwrap_or_else(|| "unknown".to_string());

        Ok(Actor(RequestContext::new(
            request_id,
            header(parts, ACTOR_HEADER),
            ip_address,
            header(parts, "user-agent"),
        )))
    }
}
