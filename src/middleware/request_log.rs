use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::{to_bytes, Body},
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::config::AppConfig;
use crate::error::AppError;

/// Bodies that are neither JSON nor short UTF-8 text are replaced by this
/// fixed placeholder in the logs.
const BODY_PLACEHOLDER: &str = "<body omitted: not json and not short text>";

/// Non-JSON text bodies longer than this are redacted.
const TEXT_RENDER_LIMIT: usize = 256;

/// Logs the inbound request and its outcome.
///
/// Both bodies are buffered here so they can be rendered; buffering is
/// bounded by the configured body-size limit. Error outcomes (status 400
/// and up) log at error level without the response body; the error
/// translator has already logged the details.
pub async fn request_log_middleware(
    State(config): State<Arc<AppConfig>>,
    req: Request,
    next: Next,
) -> Response {
    let limit = config.server.body_limit_mb * 1024 * 1024;
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let query = req.uri().query().unwrap_or("").to_owned();

    let (parts, body) = req.into_parts();
    let bytes = match to_bytes(body, limit).await {
        Ok(b) => b,
        Err(_) => {
            return AppError::bad_request("request body exceeds the configured size limit")
                .into_response();
        }
    };
    tracing::info!(
        %method,
        %path,
        %query,
        body = %render_body(&bytes),
        "incoming request"
    );
    let req = Request::from_parts(parts, Body::from(bytes));

    let start = Instant::now();
    let res = next.run(req).await;
    let elapsed_ms = start.elapsed().as_millis() as u64;
    let status = res.status();

    if status.is_client_error() || status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), elapsed_ms, "request failed");
        return res;
    }

    // Buffer the response body only for successful outcomes; all responses
    // here are small JSON payloads.
    let (parts, body) = res.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            return AppError::internal(e, "failed to read response body").into_response();
        }
    };
    tracing::info!(
        %method,
        %path,
        status = status.as_u16(),
        elapsed_ms,
        body = %render_body(&bytes),
        "request completed"
    );
    Response::from_parts(parts, Body::from(bytes))
}

/// Best-effort body rendering: valid JSON passes through as a value, short
/// UTF-8 text is trimmed, everything else gets the fixed placeholder.
fn render_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::String(String::new());
    }
    if let Ok(v) = serde_json::from_slice::<Value>(bytes) {
        return v;
    }
    match std::str::from_utf8(bytes) {
        Ok(s) if bytes.len() < TEXT_RENDER_LIMIT => Value::String(s.trim().to_owned()),
        _ => Value::String(BODY_PLACEHOLDER.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::render_body;

    #[test]
    fn json_bodies_pass_through() {
        let v = render_body(br#"{"title":"Dune"}"#);
        assert_eq!(v["title"], "Dune");
    }

    #[test]
    fn short_text_is_trimmed() {
        assert_eq!(render_body(b"  hello  "), "hello");
    }

    #[test]
    fn long_or_binary_bodies_are_redacted() {
        let long = vec![b'a'; 4096];
        assert_eq!(render_body(&long), super::BODY_PLACEHOLDER);
        assert_eq!(render_body(&[0xff, 0xfe, 0x00]), super::BODY_PLACEHOLDER);
    }

    #[test]
    fn empty_body_renders_empty_string() {
        assert_eq!(render_body(b""), "");
    }
}
