//! Health endpoint.

use axum::Json;
use serde::Serialize;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `ok` while the process serves requests.
    pub status: &'static str,
}

/// Liveness probe.
pub(super) async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
