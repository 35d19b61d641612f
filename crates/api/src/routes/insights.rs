//! Route definitions for flow-backed insights.

use axum::routing::post;
use axum::Router;

use crate::handlers::insights;
use crate::state::AppState;

/// Insight routes mounted at `/insights`.
///
/// ```text
/// POST   /performance    -> performance
/// POST   /ask            -> ask
/// POST   /trends         -> trends
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/performance", post(insights::performance))
        .route("/ask", post(insights::ask))
        .route("/trends", post(insights::trends))
}
