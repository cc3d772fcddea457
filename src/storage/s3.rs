//! S3-compatible object store client over plain HTTP with SigV4 signing.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use url::Url;

use crate::config::BucketConfig;
use crate::error::{AppError, AppResult};

use super::{sign, ObjectStore};

/// Client for a single bucket on an S3-compatible endpoint.
///
/// Addressing follows the configured flag: path-style requests go to
/// `endpoint/bucket/key`, virtual-host-style to `bucket.endpoint-host/key`.
/// The same location rules feed the Host header, the canonical request and
/// every produced URL, so signatures always match the bytes on the wire.
pub struct S3Storage {
    client: reqwest::Client,
    bucket: String,
    region: String,
    access_key_id: String,
    access_key_secret: String,
    scheme: String,
    /// `host[:port]` exactly as it appears in Host headers and URLs.
    endpoint_host: String,
    path_style: bool,
}

impl S3Storage {
    pub fn new(cfg: &BucketConfig) -> AppResult<Self> {
        let parsed = Url::parse(&cfg.endpoint)
            .map_err(|e| AppError::internal(e, "invalid object store endpoint"))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| {
                AppError::internal(
                    anyhow::anyhow!("endpoint {} has no host", cfg.endpoint),
                    "invalid object store endpoint",
                )
            })?
            .to_owned();
        let endpoint_host = match parsed.port() {
            Some(p) => format!("{}:{}", host, p),
            None => host,
        };
        Ok(Self {
            client: reqwest::Client::new(),
            bucket: cfg.bucket.clone(),
            region: cfg.region.clone(),
            access_key_id: cfg.access_key_id.clone(),
            access_key_secret: cfg.access_key_secret.clone(),
            scheme: parsed.scheme().to_owned(),
            endpoint_host,
            path_style: cfg.url_path_style,
        })
    }

    /// Host header value and canonical URI path for `key`.
    fn locate(&self, key: &str) -> (String, String) {
        let encoded = sign::uri_encode(key, false);
        if self.path_style {
            (self.endpoint_host.clone(), format!("/{}/{}", self.bucket, encoded))
        } else {
            (format!("{}.{}", self.bucket, self.endpoint_host), format!("/{}", encoded))
        }
    }

    /// Presigned GET URL computed at `now`; split out so tests can pin the
    /// signing time.
    pub fn presign_get_at(&self, key: &str, expires: Duration, now: DateTime<Utc>) -> String {
        let (host, path) = self.locate(key);
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();
        let scope = sign::credential_scope(&date, &self.region);
        let credential = format!("{}/{}", self.access_key_id, scope);
        // Already in canonical (alphabetical) order
        let query = format!(
            "X-Amz-Algorithm=AWS4-HMAC-SHA256&X-Amz-Credential={}&X-Amz-Date={}&X-Amz-Expires={}&X-Amz-SignedHeaders=host",
            sign::uri_encode(&credential, true),
            amz_date,
            expires.as_secs(),
        );
        let canonical = format!("GET\n{}\n{}\nhost:{}\n\nhost\nUNSIGNED-PAYLOAD", path, query, host);
        let string_to_sign = sign::string_to_sign(&amz_date, &scope, &canonical);
        let key_bytes = sign::signing_key(&self.access_key_secret, &date, &self.region, "s3");
        let signature = sign::sign(&key_bytes, &string_to_sign);
        format!(
            "{}://{}{}?{}&X-Amz-Signature={}",
            self.scheme, host, path, query, signature
        )
    }

    async fn send_signed(
        &self,
        method: Method,
        key: &str,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> AppResult<reqwest::Response> {
        let (host, path) = self.locate(key);
        let url = format!("{}://{}{}", self.scheme, host, path);
        let now = Utc::now();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let date = now.format("%Y%m%d").to_string();
        let payload_hash = sign::sha256_hex(&body);

        // Canonical headers, sorted by name, each line lowercase
        let mut canonical_headers = String::new();
        let mut signed: Vec<&str> = Vec::new();
        if let Some(ct) = content_type {
            canonical_headers.push_str(&format!("content-type:{}\n", ct));
            signed.push("content-type");
        }
        canonical_headers.push_str(&format!("host:{}\n", host));
        signed.push("host");
        canonical_headers.push_str(&format!("x-amz-content-sha256:{}\n", payload_hash));
        signed.push("x-amz-content-sha256");
        canonical_headers.push_str(&format!("x-amz-date:{}\n", amz_date));
        signed.push("x-amz-date");
        let signed_headers = signed.join(";");

        let canonical = format!(
            "{}\n{}\n\n{}\n{}\n{}",
            method.as_str(),
            path,
            canonical_headers,
            signed_headers,
            payload_hash
        );
        let scope = sign::credential_scope(&date, &self.region);
        let string_to_sign = sign::string_to_sign(&amz_date, &scope, &canonical);
        let key_bytes = sign::signing_key(&self.access_key_secret, &date, &self.region, "s3");
        let signature = sign::sign(&key_bytes, &string_to_sign);
        let authorization = format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            self.access_key_id, scope, signed_headers, signature
        );

        let mut req = self
            .client
            .request(method, &url)
            .header("x-amz-date", amz_date)
            .header("x-amz-content-sha256", payload_hash)
            .header("authorization", authorization);
        if let Some(ct) = content_type {
            req = req.header("content-type", ct.to_owned());
        }
        req.body(body)
            .send()
            .await
            .map_err(|e| AppError::internal(e, "object store request failed"))
    }
}

#[async_trait]
impl ObjectStore for S3Storage {
    async fn upload(&self, key: &str, content_type: &str, content: Vec<u8>) -> AppResult<()> {
        let res = self.send_signed(Method::PUT, key, Some(content_type), content).await?;
        let status = res.status();
        if !status.is_success() {
            return Err(AppError::internal(
                anyhow::anyhow!("object store returned {} for PUT {}", status, key),
                "failed to store object",
            ));
        }
        Ok(())
    }

    async fn signed_get_url(&self, key: &str, expires: Duration) -> AppResult<String> {
        Ok(self.presign_get_at(key, expires, Utc::now()))
    }

    fn public_url(&self, key: &str) -> AppResult<String> {
        let (host, path) = self.locate(key);
        Ok(format!("{}://{}{}", self.scheme, host, path))
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        // S3 DELETE of a missing key answers 204, which keeps this idempotent
        let res = self.send_signed(Method::DELETE, key, None, Vec::new()).await?;
        let status = res.status();
        if !status.is_success() {
            return Err(AppError::internal(
                anyhow::anyhow!("object store returned {} for DELETE {}", status, key),
                "failed to delete object",
            ));
        }
        Ok(())
    }
}
