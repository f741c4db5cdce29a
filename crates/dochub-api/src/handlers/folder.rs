//! Folder handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use dochub_core::types::FolderId;
use dochub_entity::folder::Folder;
use dochub_service::FolderInput;

use crate::dto::request::{FolderLookupQuery, FolderRequest, SearchQuery};
use crate::error::ApiResult;
use crate::extractors::path::parse_id;
use crate::extractors::{Actor, ValidJson};
use crate::state::AppState;

impl From<FolderRequest> for FolderInput {
    fn from(req: FolderRequest) -> Self {
        Self {
            folder_name: req.folder_name,
            description: req.description,
        }
    }
}

/// GET /departments/{department}/folders?q=
pub async fn list_folders(
    State(state): State<AppState>,
    Path(department): Path<String>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Folder>>> {
    let folders = state
        .services
        .folders
        .list_by_department(&department, query.q.as_deref())
        .await?;
    Ok(Json(folders))
}

/// POST /departments/{department}/folders
pub async fn create_folder(
    State(state): State<AppState>,
    actor: Actor,
    Path(department): Path<String>,
    ValidJson(req): ValidJson<FolderRequest>,
) -> ApiResult<(StatusCode, Json<Folder>)> {
    let folder = state
        .services
        .folders
        .create(&actor, &department, req.into())
        .await?;
    Ok((StatusCode::CREATED, Json(folder)))
}

/// GET /folders/slug/{slug}?department=
pub async fn get_folder_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(query): Query<FolderLookupQuery>,
) -> ApiResult<Json<Folder>> {
    let folder = state
        .services
        .folders
        .get(&slug, query.department.as_deref())
        .await?;
    Ok(Json(folder))
}

/// PUT /folders/{folder}
pub async fn update_folder(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    ValidJson(req): ValidJson<FolderRequest>,
) -> ApiResult<Json<Folder>> {
    let id: FolderId = parse_id(&id, "Folder")?;
    let folder = state.services.folders.rename(&actor, id, req.into()).await?;
    Ok(Json(folder))
}

/// DELETE /folders/{folder}: archives the folder and its files.
pub async fn archive_folder(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id: FolderId = parse_id(&id, "Folder")?;
    state.services.archive.archive_folder(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
