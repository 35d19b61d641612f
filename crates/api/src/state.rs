use std::sync::Arc;

use sociallens_langflow::insight::InsightClient;

use crate::config::ServerConfig;
use crate::session::SessionStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Engagement store connection pool.
    pub pool: sociallens_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Client for the hosted insight flow.
    pub insights: Arc<InsightClient>,
    /// Per-browser chat histories.
    pub sessions: Arc<SessionStore>,
}
