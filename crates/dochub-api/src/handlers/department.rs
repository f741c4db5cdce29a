//! Department handlers. Create and update take multipart forms so an image
//! can travel with the text fields.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use dochub_core::error::AppError;
use dochub_core::types::DepartmentId;
use dochub_entity::department::{Department, DepartmentImage};
use dochub_entity::folder::Folder;
use dochub_service::DepartmentInput;

use crate::dto::request::SearchQuery;
use crate::dto::response::DepartmentResponse;
use crate::error::ApiResult;
use crate::extractors::path::parse_id;
use crate::extractors::{Actor, FormFields};
use crate::state::AppState;

/// GET /departments?q=
pub async fn list_departments(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<Vec<DepartmentResponse>>> {
    let departments = state
        .services
        .departments
        .list(query.q.as_deref())
        .await?;
    Ok(Json(
        departments
            .into_iter()
            .map(|d| respond(&state, d, None))
            .collect(),
    ))
}

/// GET /departments/{department}, by id or slug
pub async fn get_department(
    State(state): State<AppState>,
    Path(department): Path<String>,
) -> ApiResult<Json<DepartmentResponse>> {
    let department = state.services.departments.get(&department).await?;
    Ok(Json(respond(&state, department, None)))
}

/// POST /departments
pub async fn create_department(
    State(state): State<AppState>,
    actor: Actor,
    mut form: FormFields,
) -> ApiResult<(StatusCode, Json<DepartmentResponse>)> {
    let input = department_input(&mut form);
    let (department, root_folder) = state.services.departments.create(&actor, input).await?;
    Ok((
        StatusCode::CREATED,
        Json(respond(&state, department, Some(root_folder))),
    ))
}

/// PUT /departments/{department}
pub async fn update_department(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
    mut form: FormFields,
) -> ApiResult<Json<DepartmentResponse>> {
    let id: DepartmentId = parse_id(&id, "Department")?;
    let input = department_input(&mut form);
    let department = state.services.departments.update(&actor, id, input).await?;
    Ok(Json(respond(&state, department, None)))
}

/// POST /departments/{department} with `_method=PUT`, for HTML forms.
pub async fn update_department_form(
    state: State<AppState>,
    actor: Actor,
    id: Path<String>,
    form: FormFields,
) -> ApiResult<Json<DepartmentResponse>> {
    if !form
        .text("_method")
        .is_some_and(|m| m.eq_ignore_ascii_case("PUT"))
    {
        return Err(AppError::validation_field(
            "_method",
            "POST to a department requires _method=PUT.",
        )
        .into());
    }
    update_department(state, actor, id, form).await
}

/// DELETE /departments/{department}
pub async fn delete_department(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id: DepartmentId = parse_id(&id, "Department")?;
    state.services.departments.delete(&actor, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn respond(state: &AppState, department: Department, root_folder: Option<Folder>) -> DepartmentResponse {
    DepartmentResponse {
        image_url: state.services.departments.image_url(&department),
        department,
        root_folder,
    }
}

/// Text fields plus the image, which is either an uploaded file or the key
/// of an already stored one. An empty file input counts as no image.
fn department_input(form: &mut FormFields) -> DepartmentInput {
    let image = match form.take_file("image") {
        Some(part) if !part.bytes.is_empty() || !part.file_name.is_empty() => {
            DepartmentImage::PendingUpload {
                bytes: part.bytes,
                file_name: part.file_name,
                content_type: part.content_type,
            }
        }
        _ => match form.text("image").map(str::trim) {
            Some(key) if !key.is_empty() => DepartmentImage::StoredPath(key.to_string()),
            _ => DepartmentImage::Unset,
        },
    };

    DepartmentInput {
        name: form.text("name").unwrap_or_default().to_string(),
        alias: form.text("alias").unwrap_or_default().to_string(),
        image,
    }
}
