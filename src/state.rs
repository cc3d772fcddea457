use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::AppConfig;
use crate::repository::{BookRepository, FileRepository};
use crate::storage::ObjectStore;
use crate::usecase::{BookUseCase, FileUseCase};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub config: Arc<AppConfig>,
    pub books: BookUseCase,
    pub files: FileUseCase,
}

impl AppState {
    pub fn new(
        db: SqlitePool,
        config: Arc<AppConfig>,
        public_store: Arc<dyn ObjectStore>,
        private_store: Arc<dyn ObjectStore>,
    ) -> Self {
        let books = BookUseCase::new(BookRepository::new(db.clone()));
        let files =
            FileUseCase::new(FileRepository::new(db.clone()), public_store, private_store);
        Self { db, config, books, files }
    }
}
