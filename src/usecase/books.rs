use tracing::{debug, info};

use crate::domain::Book;
use crate::dto::{CreateBookRequest, UpdateBookRequest};
use crate::error::{AppError, AppResult};
use crate::pagination::PageWindow;
use crate::repository::BookRepository;

#[derive(Clone)]
pub struct BookUseCase {
    repo: BookRepository,
}

impl BookUseCase {
    pub fn new(repo: BookRepository) -> Self {
        Self { repo }
    }

    pub async fn create(&self, req: &CreateBookRequest) -> AppResult<Book> {
        if req.title.trim().is_empty() {
            return Err(AppError::bad_request("title must not be empty"));
        }
        if req.author.trim().is_empty() {
            return Err(AppError::bad_request("author must not be empty"));
        }
        let book = self.repo.create(req.title.trim(), req.author.trim()).await?;
        info!(id = book.id, "book created");
        Ok(book)
    }

    pub async fn get(&self, id: i64) -> AppResult<Book> {
        debug!(id, "fetching book");
        self.repo.get(id).await
    }

    pub async fn list(&self, limit: i64, page: i64) -> AppResult<(Vec<Book>, PageWindow)> {
        debug!(limit, page, "listing books");
        let (books, window) = self.repo.list(limit, page).await?;
        debug!(count = books.len(), total = window.total_rows, "books listed");
        Ok((books, window))
    }

    pub async fn update(&self, id: i64, update: &UpdateBookRequest) -> AppResult<Book> {
        let book = self.repo.update(id, update).await?;
        info!(id, "book updated");
        Ok(book)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.repo.delete(id).await?;
        info!(id, "book deleted");
        Ok(())
    }
}
