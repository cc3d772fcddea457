use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::{StoredFile, Visibility};
use crate::error::{AppError, AppResult, OptionExt};
use crate::pagination::PageWindow;

#[derive(Clone)]
pub struct FileRepository {
    pool: SqlitePool,
}

impl FileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        name: &str,
        key: &str,
        visibility: Visibility,
    ) -> AppResult<StoredFile> {
        let now = Utc::now();
        let res = sqlx::query(
            "INSERT INTO files (name, key, visibility, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(name)
        .bind(key)
        .bind(visibility)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::internal(e, "failed to create file record"))?;

        Ok(StoredFile {
            id: res.last_insert_rowid(),
            name: name.to_owned(),
            key: key.to_owned(),
            visibility,
            created_at: now,
        })
    }

    pub async fn get(&self, id: i64) -> AppResult<StoredFile> {
        sqlx::query_as::<_, StoredFile>(
            "SELECT id, name, key, visibility, created_at FROM files WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::internal(e, "failed to get file"))?
        .ok_or_not_found("file")
    }

    pub async fn list(&self, limit: i64, page: i64) -> AppResult<(Vec<StoredFile>, PageWindow)> {
        // Same count-then-fetch contract as books: isolated count statement,
        // no transaction around the pair.
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM files")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::internal(e, "failed to count files"))?;

        let window = PageWindow::compute(limit, page, total);
        let files = sqlx::query_as::<_, StoredFile>(
            "SELECT id, name, key, visibility, created_at FROM files \
             ORDER BY id LIMIT ?1 OFFSET ?2",
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::internal(e, "failed to list files"))?;

        Ok((files, window))
    }
}
