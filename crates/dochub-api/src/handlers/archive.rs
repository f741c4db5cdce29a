//! Archive view, restore, and the unavailable permanent delete.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use dochub_core::types::{FileId, FolderId};
use dochub_entity::ItemType;
use dochub_entity::archive::ArchivedItem;
use dochub_service::archive::service::FOLDER_RESTORE_NOTE;

use crate::dto::response::MessageResponse;
use crate::error::ApiResult;
use crate::extractors::Actor;
use crate::extractors::path::parse_id;
use crate::state::AppState;

/// GET /archive
pub async fn list_archive(State(state): State<AppState>) -> ApiResult<Json<Vec<ArchivedItem>>> {
    Ok(Json(state.services.archive.list_archived().await?))
}

/// POST /archive/{item_type}/{id}/restore
pub async fn restore(
    State(state): State<AppState>,
    actor: Actor,
    Path((item_type, id)): Path<(String, String)>,
) -> ApiResult<Json<MessageResponse>> {
    let message = match item_type.parse::<ItemType>()? {
        ItemType::Folder => {
            let id: FolderId = parse_id(&id, "Folder")?;
            let folder = state.services.archive.restore_folder(&actor, id).await?;
            format!("Folder '{}' restored. {FOLDER_RESTORE_NOTE}", folder.folder_name)
        }
        ItemType::File => {
            let id: FileId = parse_id(&id, "File")?;
            let file = state.services.archive.restore_file(&actor, id).await?;
            format!("File '{}' restored.", file.file_name)
        }
    };
    Ok(Json(MessageResponse::new(message)))
}

/// DELETE /archive/{item_type}/{id}
pub async fn delete_permanently(
    State(state): State<AppState>,
    Path((item_type, id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let item_type = item_type.parse::<ItemType>()?;
    let id: Uuid = parse_id(&id, "Archived item")?;
    state
        .services
        .archive
        .delete_permanently(item_type, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
