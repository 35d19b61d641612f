//! Route definitions for the engagement store.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::engagement;
use crate::state::AppState;

/// Engagement routes mounted at `/engagement`.
///
/// ```text
/// GET    /           -> list_records
/// GET    /summary    -> summary
/// POST   /seed       -> seed_records
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(engagement::list_records))
        .route("/summary", get(engagement::summary))
        .route("/seed", post(engagement::seed_records))
}
