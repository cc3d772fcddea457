//! Object storage: the [`ObjectStore`] seam, key derivation and the
//! S3-compatible client behind it.

pub mod s3;
pub mod sign;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::AppResult;

pub use s3::S3Storage;

/// Fixed expiry window for signed URLs on private objects.
pub const SIGNED_URL_TTL: Duration = Duration::from_secs(3600);

/// Fixed prefix under which all uploaded objects live.
pub const KEY_PREFIX: &str = "upload/";

/// One bucket's worth of object-store operations. The service holds two
/// implementations, one per visibility.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn upload(&self, key: &str, content_type: &str, content: Vec<u8>) -> AppResult<()>;

    /// Time-boxed retrieval URL, recomputed on every call.
    async fn signed_get_url(&self, key: &str, expires: Duration) -> AppResult<String>;

    /// Durable retrieval URL derived purely from naming rules; must not hit
    /// the network.
    fn public_url(&self, key: &str) -> AppResult<String>;

    /// Idempotent: deleting a missing key is not the caller's fault. No
    /// route exposes this yet; the seam is reserved for explicit deletion.
    async fn delete(&self, key: &str) -> AppResult<()>;
}

/// Derives `(sanitized name, storage key)` from an uploaded file's original
/// name. Pure and deterministic: spaces become `-`, the prefix is fixed and
/// there is no randomness, so uploading the same name twice overwrites the
/// prior object.
/// Unicode and path-traversal sequences pass through unchanged; broader
/// sanitization is a known hardening gap.
pub fn object_key(original_name: &str) -> (String, String) {
    let name = original_name.replace(' ', "-");
    let key = format!("{}{}", KEY_PREFIX, name);
    (name, key)
}
