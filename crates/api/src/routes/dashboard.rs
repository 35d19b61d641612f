//! Route definitions for the HTML dashboard (root level).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Dashboard pages.
///
/// ```text
/// GET    /               -> index (?tab=performance|insights|trends)
/// POST   /performance    -> performance
/// POST   /insights       -> ask
/// POST   /trends         -> trends
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/performance", post(dashboard::performance))
        .route("/insights", post(dashboard::ask))
        .route("/trends", post(dashboard::trends))
}
