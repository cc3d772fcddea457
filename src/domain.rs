//! Persistent domain records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A catalogued book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Selects how a stored object's retrieval URL is resolved: public objects
/// get a durable URL derived from naming rules, private ones a time-boxed
/// signed URL computed on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Visibility {
    Public,
    Private,
}

/// Metadata row for an uploaded object, written only after the object-store
/// write succeeded. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct StoredFile {
    pub id: i64,
    pub name: String,
    /// Deterministic storage key; see [`crate::storage::object_key`].
    pub key: String,
    pub visibility: Visibility,
    pub created_at: DateTime<Utc>,
}
