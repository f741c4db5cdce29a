//! Activity feed handler.

use axum::Json;
use axum::extract::{Query, State};

use dochub_entity::activity::ActivityEntry;

use crate::dto::request::FeedQuery;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /activities?limit=
pub async fn list_activities(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<Vec<ActivityEntry>>> {
    let entries = state.services.activity.list_recent(query.limit).await?;
    Ok(Json(entries))
}
