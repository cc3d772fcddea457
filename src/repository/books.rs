use chrono::Utc;
use sqlx::SqlitePool;

use crate::domain::Book;
use crate::dto::UpdateBookRequest;
use crate::error::{AppError, AppResult, OptionExt};
use crate::pagination::PageWindow;

#[derive(Clone)]
pub struct BookRepository {
    pool: SqlitePool,
}

impl BookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, title: &str, author: &str) -> AppResult<Book> {
        let now = Utc::now();
        let res = sqlx::query(
            "INSERT INTO books (title, author, created_at, updated_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(title)
        .bind(author)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::internal(e, "failed to create book"))?;

        Ok(Book {
            id: res.last_insert_rowid(),
            title: title.to_owned(),
            author: author.to_owned(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get(&self, id: i64) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(
            "SELECT id, title, author, created_at, updated_at FROM books WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::internal(e, "failed to get book"))?
        .ok_or_not_found("book")
    }

    pub async fn list(&self, limit: i64, page: i64) -> AppResult<(Vec<Book>, PageWindow)> {
        // Count on its own statement so the page query's LIMIT/OFFSET/ORDER
        // cannot leak into it. Count and fetch are not transactional; a
        // listing may observe writes between the two.
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::internal(e, "failed to count books"))?;

        let window = PageWindow::compute(limit, page, total);
        let books = sqlx::query_as::<_, Book>(
            "SELECT id, title, author, created_at, updated_at FROM books \
             ORDER BY id LIMIT ?1 OFFSET ?2",
        )
        .bind(window.limit)
        .bind(window.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::internal(e, "failed to list books"))?;

        Ok((books, window))
    }

    pub async fn update(&self, id: i64, update: &UpdateBookRequest) -> AppResult<Book> {
        let mut book = self.get(id).await?;
        if let Some(title) = &update.title {
            book.title = title.clone();
        }
        if let Some(author) = &update.author {
            book.author = author.clone();
        }
        book.updated_at = Utc::now();

        sqlx::query("UPDATE books SET title = ?1, author = ?2, updated_at = ?3 WHERE id = ?4")
            .bind(&book.title)
            .bind(&book.author)
            .bind(book.updated_at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::internal(e, "failed to update book"))?;

        Ok(book)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM books WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::internal(e, "failed to delete book"))?;
        if res.rows_affected() == 0 {
            return Err(AppError::not_found("book not found"));
        }
        Ok(())
    }
}
