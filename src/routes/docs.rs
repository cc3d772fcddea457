use axum::{response::IntoResponse, Json};
use utoipa::OpenApi;

/// OpenAPI description of the public surface. Served only in `dev` mode and
/// behind the basic-auth gate.
#[derive(OpenApi)]
#[openapi(
    info(title = "bookbin API", description = "Book records and uploaded files"),
    paths(
        crate::routes::health::health,
        crate::routes::books::create_book,
        crate::routes::books::list_books,
        crate::routes::books::get_book,
        crate::routes::books::update_book,
        crate::routes::books::delete_book,
        crate::routes::files::upload_private,
        crate::routes::files::upload_public,
        crate::routes::files::list_files,
        crate::routes::files::get_file,
    ),
    components(schemas(
        crate::dto::CreateBookRequest,
        crate::dto::UpdateBookRequest,
        crate::dto::BookResponse,
        crate::dto::FileResponse,
        crate::dto::ErrorResponse,
        crate::dto::Pagination,
    ))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Minimal landing page pointing at the machine-readable document.
pub async fn docs_index() -> impl IntoResponse {
    axum::response::Html(
        "<!doctype html><title>bookbin API</title>\
         <h1>bookbin API</h1>\
         <p>The OpenAPI document is at <a href=\"/docs/openapi.json\">/docs/openapi.json</a>.</p>",
    )
}
