use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::dto::ErrorResponse;

/// Classification of a failure, mapped 1:1 to an HTTP status code.
///
/// The kind is fixed at construction time and is never rewritten while an
/// error propagates through the use-case and handler layers; the boundary
/// translator in [`AppError::into_response`] is the only place that turns a
/// kind into a wire-level status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or rejected client input.
    BadRequest,
    /// Missing or invalid credentials.
    Unauthorized,
    /// Authenticated but not allowed.
    Forbidden,
    /// The requested resource does not exist.
    NotFound,
    /// The request conflicts with current state.
    Conflict,
    /// Well-formed input that fails domain rules.
    Unprocessable,
    /// Anything unexpected: I/O, database, object store, bugs.
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad request",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::NotFound => "not found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Unprocessable => "unprocessable",
            ErrorKind::Internal => "internal",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The application-wide failure type.
///
/// Carries a classification, a curated message safe to show clients, an
/// optional wrapped cause, and a backtrace snapshot taken at the point of
/// first detection. Every constructor captures the backtrace unconditionally;
/// that costs a stack walk on each failure path, paid for in post-mortem
/// diagnosability. The wrapped cause is for server-side logs only and never
/// reaches the response body.
#[derive(Debug)]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    source: Option<anyhow::Error>,
    backtrace: Backtrace,
}

impl AppError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, source: Option<anyhow::Error>) -> Self {
        Self { kind, message: message.into(), source, backtrace: Backtrace::force_capture() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, message, None)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message, None)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message, None)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message, None)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, message, None)
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unprocessable, message, None)
    }

    /// Internal failure wrapping a lower-level cause. `message` is what the
    /// client sees; `source` stays in the logs.
    pub fn internal(source: impl Into<anyhow::Error>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message, Some(source.into()))
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn backtrace(&self) -> &Backtrace {
        &self.backtrace
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref())
    }
}

/// The centralized error-to-response translation. Internal failures are
/// logged here together with the wrapped cause and the captured stack; the
/// response body only ever carries the curated message.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self.kind {
            ErrorKind::Internal => {
                tracing::error!(
                    error = %self,
                    source = ?self.source,
                    stack = %self.backtrace,
                    "request failed"
                );
            }
            _ => {
                tracing::debug!(error = %self, "request rejected");
            }
        }
        (self.kind.status(), Json(ErrorResponse { error: self.message })).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err, "internal server error")
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::not_found("record not found"),
            other => AppError::internal(other, "database error"),
        }
    }
}

/// A type alias for `Result<T, AppError>`, used throughout the application.
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait converting `Option` lookups into `NotFound` errors.
pub trait OptionExt<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, entity: &str) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found(format!("{} not found", entity)))
    }
}
