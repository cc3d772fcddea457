use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::domain::Visibility;
use crate::dto::{paginated, success, FileResponse};
use crate::error::{AppError, AppResult};
use crate::pagination::PageQuery;
use crate::state::AppState;

#[utoipa::path(post, path = "/files/private", tag = "file",
    responses(
        (status = 201, description = "Created", body = FileResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse)
    ))]
pub async fn upload_private(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    upload(state, multipart, Visibility::Private).await
}

#[utoipa::path(post, path = "/files/public", tag = "file",
    responses(
        (status = 201, description = "Created", body = FileResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse)
    ))]
pub async fn upload_public(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    upload(state, multipart, Visibility::Public).await
}

async fn upload(
    state: AppState,
    multipart: Multipart,
    visibility: Visibility,
) -> AppResult<impl IntoResponse> {
    let (name, content_type, content) = read_upload(multipart).await?;
    let file = state.files.create(&name, &content_type, content, visibility).await?;
    let url = state.files.resolve_url(&file).await?;
    Ok((StatusCode::CREATED, Json(success(FileResponse::resolved(&file, url)))))
}

/// Pulls the `file` field out of the multipart stream: filename,
/// content type and the fully buffered content.
async fn read_upload(mut multipart: Multipart) -> AppResult<(String, String, Vec<u8>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(format!("invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field
            .file_name()
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::bad_request("file field is missing a filename"))?
            .to_owned();
        let content_type =
            field.content_type().unwrap_or("application/octet-stream").to_owned();
        let content = field
            .bytes()
            .await
            .map_err(|e| AppError::bad_request(format!("failed to read file field: {}", e)))?;
        return Ok((name, content_type, content.to_vec()));
    }
    Err(AppError::bad_request("missing multipart field 'file'"))
}

#[utoipa::path(get, path = "/files", tag = "file", params(PageQuery),
    responses(
        (status = 200, description = "Paginated list of files"),
        (status = 400, description = "Limit exceeds the maximum", body = crate::dto::ErrorResponse)
    ))]
pub async fn list_files(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let (limit, page) = query.resolve()?;
    let (files, window) = state.files.list(limit, page).await?;
    // List items carry no URLs: no per-row signing work on listings
    let items: Vec<FileResponse> = files.iter().map(FileResponse::listed).collect();
    Ok(Json(paginated(items, &window)))
}

#[utoipa::path(get, path = "/files/{id}", tag = "file",
    params(("id" = i64, Path, description = "File id")),
    responses(
        (status = 200, description = "File metadata with resolved URL", body = FileResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse)
    ))]
pub async fn get_file(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let file = state.files.get(id).await?;
    let url = state.files.resolve_url(&file).await?;
    Ok(Json(success(FileResponse::resolved(&file, url))))
}
