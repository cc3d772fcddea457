use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::dto::{paginated, success, BookResponse, CreateBookRequest, UpdateBookRequest};
use crate::error::{AppError, AppResult};
use crate::pagination::PageQuery;
use crate::state::AppState;

#[utoipa::path(post, path = "/books", tag = "book", request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Created", body = BookResponse),
        (status = 400, description = "Bad request", body = crate::dto::ErrorResponse)
    ))]
pub async fn create_book(
    State(state): State<AppState>,
    body: Result<Json<CreateBookRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = body.map_err(|e| AppError::bad_request(e.body_text()))?;
    let book = state.books.create(&body).await?;
    Ok((StatusCode::CREATED, Json(success(BookResponse::from(&book)))))
}

#[utoipa::path(get, path = "/books", tag = "book", params(PageQuery),
    responses(
        (status = 200, description = "Paginated list of books"),
        (status = 400, description = "Limit exceeds the maximum", body = crate::dto::ErrorResponse)
    ))]
pub async fn list_books(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> AppResult<impl IntoResponse> {
    let (limit, page) = query.resolve()?;
    let (books, window) = state.books.list(limit, page).await?;
    let items: Vec<BookResponse> = books.iter().map(BookResponse::from).collect();
    Ok(Json(paginated(items, &window)))
}

#[utoipa::path(get, path = "/books/{id}", tag = "book",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 200, description = "OK", body = BookResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse)
    ))]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let book = state.books.get(id).await?;
    Ok(Json(success(BookResponse::from(&book))))
}

#[utoipa::path(patch, path = "/books/{id}", tag = "book",
    params(("id" = i64, Path, description = "Book id")),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "OK", body = BookResponse),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse)
    ))]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(body) = body.map_err(|e| AppError::bad_request(e.body_text()))?;
    let book = state.books.update(id, &body).await?;
    Ok(Json(success(BookResponse::from(&book))))
}

#[utoipa::path(delete, path = "/books/{id}", tag = "book",
    params(("id" = i64, Path, description = "Book id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = crate::dto::ErrorResponse)
    ))]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    state.books.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
