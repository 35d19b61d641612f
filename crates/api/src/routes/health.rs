use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the engagement store is reachable.
    pub db_healthy: bool,
    /// Whether workflow credentials were loaded.
    pub insights_configured: bool,
}

/// GET /health -- returns service, database and workflow configuration health.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = sociallens_db::health_check(&state.pool).await.is_ok();
    let insights_configured = state.insights.config_error().is_none();

    let status = if db_healthy && insights_configured {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        insights_configured,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
