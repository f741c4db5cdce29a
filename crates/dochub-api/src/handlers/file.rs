//! File handlers, addressed under their folder (id or slug). A folder slug
//! shared by several departments is narrowed with `?department=`.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use dochub_core::error::AppError;
use dochub_core::types::FileId;
use dochub_entity::file::File;
use dochub_service::{FolderRef, UploadInput};

use crate::dto::request::{FolderLookupQuery, RenameFileRequest};
use crate::dto::response::{FileResponse, MessageResponse};
use crate::error::ApiResult;
use crate::extractors::path::parse_id;
use crate::extractors::{Actor, FormFields, ValidJson};
use crate::state::AppState;

fn respond(state: &AppState, file: File) -> FileResponse {
    FileResponse {
        url: state.services.files.url(&file),
        file,
    }
}

fn folder_ref<'a>(folder: &'a str, query: &'a FolderLookupQuery) -> FolderRef<'a> {
    FolderRef::new(folder).in_department(query.department.as_deref())
}

/// GET /folders/{folder}/files?department=
pub async fn list_files(
    State(state): State<AppState>,
    Path(folder): Path<String>,
    Query(query): Query<FolderLookupQuery>,
) -> ApiResult<Json<Vec<FileResponse>>> {
    let files = state
        .services
        .files
        .list(folder_ref(&folder, &query))
        .await?;
    Ok(Json(files.into_iter().map(|f| respond(&state, f)).collect()))
}

/// POST /folders/{folder}/files (multipart, `file` part)
pub async fn upload_file(
    State(state): State<AppState>,
    actor: Actor,
    Path(folder): Path<String>,
    Query(query): Query<FolderLookupQuery>,
    mut form: FormFields,
) -> ApiResult<(StatusCode, Json<FileResponse>)> {
    let part = form
        .take_file("file")
        .ok_or_else(|| AppError::validation_field("file", "The file field is required."))?;

    let input = UploadInput {
        bytes: part.bytes,
        file_name: part.file_name,
        content_type: part.content_type,
    };
    let file = state
        .services
        .uploads
        .upload(&actor, folder_ref(&folder, &query), input)
        .await?;
    Ok((StatusCode::CREATED, Json(respond(&state, file))))
}

/// PUT /folders/{folder}/files/{file}
pub async fn rename_file(
    State(state): State<AppState>,
    actor: Actor,
    Path((folder, file_id)): Path<(String, String)>,
    Query(query): Query<FolderLookupQuery>,
    ValidJson(req): ValidJson<RenameFileRequest>,
) -> ApiResult<Json<FileResponse>> {
    let file_id: FileId = parse_id(&file_id, "File")?;
    let file = state
        .services
        .files
        .rename(&actor, folder_ref(&folder, &query), file_id, &req.file_name)
        .await?;
    Ok(Json(respond(&state, file)))
}

/// DELETE /folders/{folder}/files/{file}: archives the file.
pub async fn archive_file(
    State(state): State<AppState>,
    actor: Actor,
    Path((folder, file_id)): Path<(String, String)>,
    Query(query): Query<FolderLookupQuery>,
) -> ApiResult<Json<MessageResponse>> {
    let file_id: FileId = parse_id(&file_id, "File")?;
    let (_, file) = state
        .services
        .files
        .find_in_folder(folder_ref(&folder, &query), file_id)
        .await?;
    let file = state.services.archive.archive_file(&actor, file.id).await?;
    Ok(Json(MessageResponse::new(format!(
        "File '{}' moved to the archive.",
        file.file_name
    ))))
}
