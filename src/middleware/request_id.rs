use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// The correlation id, readable from request extensions by any handler that
/// needs it directly.
#[derive(Debug, Clone)]
pub struct RequestId(pub String);

/// Binds a correlation identifier to the request's logical scope.
///
/// A caller-supplied `x-request-id` is accepted if it is clean ASCII,
/// otherwise a fresh UUIDv4 is generated. The id is bound as a field on a
/// tracing span that instruments the rest of the pipeline, so every log
/// line emitted by any layer while handling this request carries it,
/// without threading the id through call parameters and without global
/// state that concurrent requests could clobber. The id is echoed on the
/// response for client-side correlation.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= 128)
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    req.extensions_mut().insert(RequestId(id.clone()));

    let span = tracing::info_span!("request", request_id = %id);
    let mut res = next.run(req).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&id) {
        res.headers_mut().insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }
    res
}
