use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{StoredFile, Visibility};
use crate::error::AppResult;
use crate::pagination::PageWindow;
use crate::repository::FileRepository;
use crate::storage::{object_key, ObjectStore, SIGNED_URL_TTL};

#[derive(Clone)]
pub struct FileUseCase {
    repo: FileRepository,
    public: Arc<dyn ObjectStore>,
    private: Arc<dyn ObjectStore>,
}

impl FileUseCase {
    pub fn new(
        repo: FileRepository,
        public: Arc<dyn ObjectStore>,
        private: Arc<dyn ObjectStore>,
    ) -> Self {
        Self { repo, public, private }
    }

    fn store(&self, visibility: Visibility) -> &dyn ObjectStore {
        match visibility {
            Visibility::Public => self.public.as_ref(),
            Visibility::Private => self.private.as_ref(),
        }
    }

    /// Writes the object first, then the metadata row. A failed store write
    /// leaves no metadata behind; a failed row insert leaves an orphaned
    /// object, which the deterministic key overwrites on retry.
    pub async fn create(
        &self,
        original_name: &str,
        content_type: &str,
        content: Vec<u8>,
        visibility: Visibility,
    ) -> AppResult<StoredFile> {
        let (name, key) = object_key(original_name);
        debug!(%key, %content_type, ?visibility, "uploading object");
        self.store(visibility).upload(&key, content_type, content).await?;
        let file = self.repo.create(&name, &key, visibility).await?;
        info!(id = file.id, %key, "file stored");
        Ok(file)
    }

    pub async fn get(&self, id: i64) -> AppResult<StoredFile> {
        debug!(id, "fetching file");
        self.repo.get(id).await
    }

    pub async fn list(&self, limit: i64, page: i64) -> AppResult<(Vec<StoredFile>, PageWindow)> {
        debug!(limit, page, "listing files");
        self.repo.list(limit, page).await
    }

    /// Resolves the retrieval URL for a stored object. Private objects get a
    /// fresh signed URL on every call; signing failures propagate instead of
    /// degrading into a sentinel value. Public objects never touch the
    /// signing path.
    pub async fn resolve_url(&self, file: &StoredFile) -> AppResult<String> {
        match file.visibility {
            Visibility::Private => self.private.signed_get_url(&file.key, SIGNED_URL_TTL).await,
            Visibility::Public => self.public.public_url(&file.key),
        }
    }
}
