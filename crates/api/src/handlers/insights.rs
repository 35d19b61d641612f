//! JSON handlers that ask the hosted flow for insights.
//!
//! Each endpoint turns the caller's selections into a natural-language
//! request, runs the flow once and returns the extracted answer.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use sociallens_core::engagement::PostTypeSummary;
use sociallens_core::metrics::{self, Kpi, MetricsTable};
use sociallens_core::query::{self, Metric, PostTypeFilter, TrendPeriod};
use sociallens_db::repositories::EngagementRepo;
use sociallens_db::DbPool;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::session::ChatEntry;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct PerformanceRequest {
    /// Defaults to `All Types`.
    pub post_type: Option<PostTypeFilter>,
    /// Defaults to `Engagement Rate` and `Likes`.
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Serialize)]
pub struct PerformanceAnalysis {
    pub query: String,
    pub message: String,
    pub metrics: MetricsTable,
    pub kpis: Vec<Kpi>,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct TrendRequest {
    pub metric: Metric,
    pub period: TrendPeriod,
    #[serde(default)]
    pub compare: bool,
}

#[derive(Debug, Serialize)]
pub struct TrendAnalysis {
    pub query: String,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Shared logic (also used by the dashboard)
// ---------------------------------------------------------------------------

/// Run the performance analysis and build the metrics table.
pub async fn analyze_performance(
    state: &AppState,
    post_type: PostTypeFilter,
    metrics: &[Metric],
) -> AppResult<PerformanceAnalysis> {
    let query = query::performance_query(post_type, metrics);
    let insight = state.insights.ask(&query).await?;

    let table = match metrics::insight_table(&insight.message) {
        Some(table) => table,
        None => metrics::fallback_table(&fallback_summary(&state.pool).await),
    };
    let kpis = table.kpis();

    tracing::info!(%post_type, source = ?table.source, "Performance analysis complete");

    Ok(PerformanceAnalysis {
        query,
        message: insight.message,
        metrics: table,
        kpis,
    })
}

/// Ask a free-form question.
pub async fn ask_question(state: &AppState, raw_question: &str) -> AppResult<ChatEntry> {
    let question = query::normalize_question(raw_question)?;
    let insight = state.insights.ask(&question).await?;

    Ok(ChatEntry::now(question, insight.message))
}

/// Run the trend analysis.
pub async fn analyze_trends(
    state: &AppState,
    metric: Metric,
    period: TrendPeriod,
    compare: bool,
) -> AppResult<TrendAnalysis> {
    let query = query::trend_query(metric, period, compare);
    let insight = state.insights.ask(&query).await?;

    Ok(TrendAnalysis {
        query,
        message: insight.message,
    })
}

/// Store summary used when the answer carries no parsable metrics.
///
/// A store failure only degrades the table to the baseline.
async fn fallback_summary(pool: &DbPool) -> Vec<PostTypeSummary> {
    EngagementRepo::summary_by_post_type(pool)
        .await
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Engagement summary unavailable, using baseline metrics");
            Vec::new()
        })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/insights/performance
pub async fn performance(
    State(state): State<AppState>,
    Json(input): Json<PerformanceRequest>,
) -> AppResult<impl IntoResponse> {
    let post_type = input.post_type.unwrap_or(PostTypeFilter::AllTypes);
    let analysis = analyze_performance(&state, post_type, &input.metrics).await?;

    Ok(Json(DataResponse { data: analysis }))
}

/// POST /api/v1/insights/ask
pub async fn ask(
    State(state): State<AppState>,
    Json(input): Json<AskRequest>,
) -> AppResult<impl IntoResponse> {
    let entry = ask_question(&state, &input.question).await?;

    Ok(Json(DataResponse { data: entry }))
}

/// POST /api/v1/insights/trends
pub async fn trends(
    State(state): State<AppState>,
    Json(input): Json<TrendRequest>,
) -> AppResult<impl IntoResponse> {
    let analysis = analyze_trends(&state, input.metric, input.period, input.compare).await?;

    Ok(Json(DataResponse { data: analysis }))
}
