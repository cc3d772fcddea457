//! Router assembly: the ordered request pipeline around the route handlers.
//!
//! Outermost to innermost: correlation-id span, request/response logging,
//! body-size limit, panic recovery, then route dispatch. Error-to-response
//! translation happens in [`crate::error`] when a handler's `AppError`
//! bubbles out.

pub mod books;
pub mod docs;
pub mod files;
pub mod health;

use std::any::Any;
use std::backtrace::Backtrace;

use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::AppError;
use crate::middleware::{docs_auth, request_id, request_log};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let config = state.config.clone();

    let mut app = Router::new()
        .route("/health", get(health::health))
        .route("/readyz", get(health::readyz))
        .route("/books", post(books::create_book).get(books::list_books))
        .route(
            "/books/{id}",
            get(books::get_book).patch(books::update_book).delete(books::delete_book),
        )
        .route("/files", get(files::list_files))
        .route("/files/{id}", get(files::get_file))
        .route("/files/private", post(files::upload_private))
        .route("/files/public", post(files::upload_public));

    // Interactive docs only outside production, and only with credentials
    if config.server.env == "dev" {
        let docs_routes = Router::new()
            .route("/docs", get(docs::docs_index))
            .route("/docs/openapi.json", get(docs::openapi_json))
            .layer(from_fn_with_state(config.clone(), docs_auth::docs_auth_middleware));
        app = app.merge(docs_routes);
    }

    app.with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(DefaultBodyLimit::max(config.server.body_limit_mb * 1024 * 1024))
        .layer(from_fn_with_state(config, request_log::request_log_middleware))
        .layer(from_fn(request_id::request_id_middleware))
}

/// Converts an uncaught handler panic into an internal failure instead of
/// tearing the process down. The stack is captured here, at the recovery
/// point, and stays in the logs.
pub(crate) fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    };
    tracing::error!(panic = %detail, stack = %Backtrace::force_capture(), "handler panicked");
    AppError::internal(anyhow::anyhow!("panic: {}", detail), "internal server error")
        .into_response()
}
