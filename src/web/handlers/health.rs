//! Liveness probe.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::state::AppState;
use crate::web::dto::health::{CheckStatus, HealthChecks, HealthResponse};

/// Reports whether the service can reach its link store.
///
/// # Endpoint
///
/// `GET /health` (public)
///
/// Answers `200 OK` when the store round-trip succeeds and
/// `503 Service Unavailable` otherwise; the body is the same shape in both cases:
///
/// ```json
/// { "status": "healthy", "version": "0.1.0", "checks": { "database": { "status": "ok" } } }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let database = match state.link_service.ping().await {
        Ok(()) => CheckStatus::ok(),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            CheckStatus::error(e.to_string())
        }
    };

    let (code, status) = if database.is_ok() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks { database },
    };

    (code, Json(body))
}
