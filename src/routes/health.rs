use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

// Liveness probe: fixed payload, no business logic, no rate limiting
#[utoipa::path(get, path = "/health", tag = "health",
    responses((status = 200, description = "Process is alive")))]
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

// Readiness probe: checks DB connectivity with timeout protection. The
// cause stays in the logs; the body is a fixed string.
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    let query = sqlx::query("SELECT 1").fetch_one(&state.db);
    match tokio::time::timeout(std::time::Duration::from_secs(5), query).await {
        Ok(Ok(_)) => (StatusCode::OK, "ready").into_response(),
        Ok(Err(e)) => {
            tracing::error!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "not ready").into_response()
        }
        Err(_) => {
            tracing::error!("readiness check timed out");
            (StatusCode::SERVICE_UNAVAILABLE, "not ready").into_response()
        }
    }
}
