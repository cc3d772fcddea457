//! Wire-level request/response shapes and the response envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Book, StoredFile};
use crate::pagination::PageWindow;

/// Error envelope: `{"error": "..."}`. The message is always the curated
/// one attached to the failure, never the underlying cause text.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    pub data: T,
}

pub fn success<T>(data: T) -> SuccessResponse<T> {
    SuccessResponse { data }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Pagination {
    pub current_page: i64,
    pub last_page: i64,
    pub limit: i64,
    pub total: i64,
}

/// Paginated success envelope: `{"data": [...], "pagination": {...}}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginationResponse<T> {
    pub data: Vec<T>,
    pub pagination: Pagination,
}

pub fn paginated<T>(data: Vec<T>, window: &PageWindow) -> PaginationResponse<T> {
    PaginationResponse {
        data,
        pagination: Pagination {
            current_page: window.page,
            last_page: window.total_pages,
            limit: window.limit,
            total: window.total_rows,
        },
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BookResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self { id: book.id, title: book.title.clone(), author: book.author.clone() }
    }
}

/// File metadata response. `url` and `created_at` are present on single-item
/// reads, where the retrieval URL is resolved per visibility; list items
/// carry id and name only.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FileResponse {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl FileResponse {
    pub fn listed(file: &StoredFile) -> Self {
        Self { id: file.id, name: file.name.clone(), url: None, created_at: None }
    }

    pub fn resolved(file: &StoredFile, url: String) -> Self {
        Self { id: file.id, name: file.name.clone(), url: Some(url), created_at: Some(file.created_at) }
    }
}
