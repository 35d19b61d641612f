pub mod dashboard;
pub mod engagement;
pub mod health;
pub mod insights;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /engagement                      list recent records (GET)
/// /engagement/summary              per-post-type averages (GET)
/// /engagement/seed                 regenerate mock data (POST)
///
/// /insights/performance            performance analysis (POST)
/// /insights/ask                    free-form question (POST)
/// /insights/trends                 trend analysis (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/engagement", engagement::router())
        .nest("/insights", insights::router())
}
