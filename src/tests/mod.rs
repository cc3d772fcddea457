//! In-crate test suite.
//!
//! - **pagination_tests**: window arithmetic and query-parameter resolution
//! - **error_tests**: classification, translation and cause confinement
//! - **storage_tests**: key derivation, URL styles and request signing
//! - **api_tests**: end-to-end HTTP flows over the assembled router

pub mod pagination_tests;
pub mod storage_tests;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::NamedTempFile;

use crate::config::{
    AppConfig, BucketConfig, DatabaseConfig, LogConfig, ServerConfig, StorageConfig,
};
use crate::error::AppResult;
use crate::state::AppState;
use crate::storage::ObjectStore;

/// In-memory [`ObjectStore`] double. Signed and public URLs are shaped
/// distinctly so tests can tell which resolution path produced them.
pub struct MemoryStore {
    base: String,
    objects: Mutex<HashMap<String, (String, Vec<u8>)>>,
}

impl MemoryStore {
    pub fn new(base: &str) -> Self {
        Self { base: base.to_owned(), objects: Mutex::new(HashMap::new()) }
    }

    pub fn object(&self, key: &str) -> Option<(String, Vec<u8>)> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn upload(&self, key: &str, content_type: &str, content: Vec<u8>) -> AppResult<()> {
        self.objects.lock().unwrap().insert(key.to_owned(), (content_type.to_owned(), content));
        Ok(())
    }

    async fn signed_get_url(&self, key: &str, expires: Duration) -> AppResult<String> {
        Ok(format!("{}/signed/{}?expires={}", self.base, key, expires.as_secs()))
    }

    fn public_url(&self, key: &str) -> AppResult<String> {
        Ok(format!("{}/public/{}", self.base, key))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.objects.lock().unwrap().remove(key);
        Ok(())
    }
}

pub fn test_bucket(bucket: &str) -> BucketConfig {
    BucketConfig {
        bucket: bucket.to_owned(),
        endpoint: "https://s3.test.local".to_owned(),
        region: "auto".to_owned(),
        access_key_id: "AKIDEXAMPLE".to_owned(),
        access_key_secret: "secret".to_owned(),
        url_path_style: false,
    }
}

pub fn test_config(db_url: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: 8080,
            name: "bookbin-test".to_owned(),
            env: "dev".to_owned(),
            body_limit_mb: 4,
            docs_user: "admin".to_owned(),
            docs_pass: "changeme".to_owned(),
        },
        database: DatabaseConfig { url: db_url.to_owned() },
        log: LogConfig { level: "info".to_owned(), json: false },
        storage: StorageConfig {
            public: test_bucket("public-bucket"),
            private: test_bucket("private-bucket"),
        },
    }
}

/// Full application over a temporary database and in-memory stores. The
/// returned tempfile must outlive the pool.
pub async fn setup_test_app() -> (axum::Router, AppState, Arc<MemoryStore>, Arc<MemoryStore>, NamedTempFile)
{
    let temp_db = NamedTempFile::new().unwrap();
    let db_url = format!("sqlite:{}", temp_db.path().display());

    sqlx::Sqlite::create_database(&db_url).await.unwrap();
    let pool = SqlitePoolOptions::new().max_connections(1).connect(&db_url).await.unwrap();
    crate::db::init_db(&pool).await.unwrap();

    let public = Arc::new(MemoryStore::new("http://store.test"));
    let private = Arc::new(MemoryStore::new("http://store.test"));
    let config = Arc::new(test_config(&db_url));
    let state = AppState::new(pool, config, public.clone(), private.clone());
    let app = crate::routes::router(state.clone());

    (app, state, public, private, temp_db)
}
