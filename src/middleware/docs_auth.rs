use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::config::AppConfig;
use crate::error::AppError;

/// Basic-auth gate in front of the documentation routes.
///
/// Credentials come from `server.docs_user` / `server.docs_pass`; the
/// comparison is constant-time to avoid leaking prefix matches.
pub async fn docs_auth_middleware(
    State(config): State<Arc<AppConfig>>,
    req: Request,
    next: Next,
) -> Response {
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Basic "))
        .and_then(|encoded| STANDARD.decode(encoded).ok())
        .and_then(|raw| String::from_utf8(raw).ok())
        .is_some_and(|creds| {
            let expected = format!("{}:{}", config.server.docs_user, config.server.docs_pass);
            constant_time_eq(creds.as_bytes(), expected.as_bytes())
        });

    if authorized {
        return next.run(req).await;
    }

    let mut res = AppError::unauthorized("documentation requires credentials").into_response();
    res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"docs\""),
    );
    res
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
