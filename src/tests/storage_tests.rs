use std::time::Duration;

use chrono::{TimeZone, Utc};

use crate::config::BucketConfig;
use crate::storage::{object_key, sign, ObjectStore, S3Storage, KEY_PREFIX};

use super::test_bucket;

#[test]
fn object_key_replaces_spaces_and_prefixes() {
    let (name, key) = object_key("my file.txt");
    assert_eq!(name, "my-file.txt");
    assert_eq!(key, "upload/my-file.txt");
}

#[test]
fn object_key_is_deterministic() {
    assert_eq!(object_key("report.pdf"), object_key("report.pdf"));
    let (_, key) = object_key("a b c");
    assert_eq!(key, format!("{}a-b-c", KEY_PREFIX));
}

#[test]
fn uri_encode_keeps_unreserved_characters() {
    assert_eq!(sign::uri_encode("AZaz09-._~", true), "AZaz09-._~");
    assert_eq!(sign::uri_encode("a b", true), "a%20b");
    assert_eq!(sign::uri_encode("a+b", true), "a%2Bb");
}

#[test]
fn uri_encode_slash_handling() {
    assert_eq!(sign::uri_encode("upload/a.txt", false), "upload/a.txt");
    assert_eq!(sign::uri_encode("upload/a.txt", true), "upload%2Fa.txt");
}

#[test]
fn sha256_hex_known_values() {
    assert_eq!(
        sign::sha256_hex(b""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
    assert_eq!(
        sign::sha256_hex(b"abc"),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn signing_is_deterministic_and_key_sensitive() {
    let key_a = sign::signing_key("secret", "20260830", "auto", "s3");
    let key_b = sign::signing_key("secret", "20260830", "auto", "s3");
    assert_eq!(key_a, key_b);
    assert_eq!(key_a.len(), 32);

    let other_day = sign::signing_key("secret", "20260831", "auto", "s3");
    assert_ne!(key_a, other_day);
    let other_secret = sign::signing_key("secret2", "20260830", "auto", "s3");
    assert_ne!(key_a, other_secret);

    let sig = sign::sign(&key_a, "payload");
    assert_eq!(sig.len(), 64);
    assert_ne!(sig, sign::sign(&other_day, "payload"));
}

#[test]
fn credential_scope_shape() {
    assert_eq!(sign::credential_scope("20260830", "auto"), "20260830/auto/s3/aws4_request");
}

#[test]
fn public_url_virtual_host_style() {
    let store = S3Storage::new(&test_bucket("assets")).unwrap();
    let url = store.public_url("upload/a.txt").unwrap();
    assert_eq!(url, "https://assets.s3.test.local/upload/a.txt");
}

#[test]
fn public_url_path_style() {
    let cfg = BucketConfig { url_path_style: true, ..test_bucket("assets") };
    let store = S3Storage::new(&cfg).unwrap();
    let url = store.public_url("upload/a.txt").unwrap();
    assert_eq!(url, "https://s3.test.local/assets/upload/a.txt");
}

#[test]
fn public_url_keeps_endpoint_port() {
    let cfg = BucketConfig {
        endpoint: "http://localhost:9000".to_owned(),
        url_path_style: true,
        ..test_bucket("assets")
    };
    let store = S3Storage::new(&cfg).unwrap();
    let url = store.public_url("upload/a.txt").unwrap();
    assert_eq!(url, "http://localhost:9000/assets/upload/a.txt");
}

#[test]
fn rejects_endpoint_without_host() {
    let cfg = BucketConfig { endpoint: "not a url".to_owned(), ..test_bucket("assets") };
    assert!(S3Storage::new(&cfg).is_err());
}

#[test]
fn presigned_url_carries_sigv4_query_parameters() {
    let store = S3Storage::new(&test_bucket("private-bucket")).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
    let url = store.presign_get_at("upload/a.txt", Duration::from_secs(3600), now);

    assert!(url.starts_with("https://private-bucket.s3.test.local/upload/a.txt?"));
    assert!(url.contains("X-Amz-Algorithm=AWS4-HMAC-SHA256"));
    assert!(url.contains("X-Amz-Credential=AKIDEXAMPLE%2F20260830%2Fauto%2Fs3%2Faws4_request"));
    assert!(url.contains("X-Amz-Date=20260830T120000Z"));
    assert!(url.contains("X-Amz-Expires=3600"));
    assert!(url.contains("X-Amz-SignedHeaders=host"));
    assert!(url.contains("X-Amz-Signature="));
}

#[test]
fn presigning_is_deterministic_at_a_fixed_instant() {
    let store = S3Storage::new(&test_bucket("private-bucket")).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
    let a = store.presign_get_at("upload/a.txt", Duration::from_secs(3600), now);
    let b = store.presign_get_at("upload/a.txt", Duration::from_secs(3600), now);
    assert_eq!(a, b);
}

#[test]
fn presigned_signature_varies_with_key_and_time() {
    let store = S3Storage::new(&test_bucket("private-bucket")).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap();
    let later = Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 1).unwrap();

    let signature = |url: &str| {
        url.split("X-Amz-Signature=").nth(1).map(str::to_owned).unwrap()
    };
    let a = signature(&store.presign_get_at("upload/a.txt", Duration::from_secs(3600), now));
    let b = signature(&store.presign_get_at("upload/b.txt", Duration::from_secs(3600), now));
    let c = signature(&store.presign_get_at("upload/a.txt", Duration::from_secs(3600), later));
    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[tokio::test]
async fn memory_store_urls_distinguish_resolution_paths() {
    let store = super::MemoryStore::new("http://store.test");
    let signed = store.signed_get_url("upload/a.txt", Duration::from_secs(3600)).await.unwrap();
    let public = store.public_url("upload/a.txt").unwrap();
    assert_eq!(signed, "http://store.test/signed/upload/a.txt?expires=3600");
    assert_eq!(public, "http://store.test/public/upload/a.txt");
    assert_ne!(signed, public);
}

#[tokio::test]
async fn memory_store_overwrites_and_deletes_idempotently() {
    let store = super::MemoryStore::new("http://store.test");
    store.upload("k", "text/plain", b"one".to_vec()).await.unwrap();
    store.upload("k", "text/plain", b"two".to_vec()).await.unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.object("k").unwrap().1, b"two");

    store.delete("k").await.unwrap();
    store.delete("k").await.unwrap();
    assert_eq!(store.len(), 0);
}
