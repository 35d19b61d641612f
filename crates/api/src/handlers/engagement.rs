//! Handlers for the engagement store.
//!
//! Lists stored mock records, aggregates them per post type and lets
//! callers regenerate the mock data set.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use sociallens_db::models::engagement::EngagementListParams;
use sociallens_db::repositories::EngagementRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::seed::{self, MAX_SEED_RECORDS};
use crate::state::AppState;

/// Request body for `POST /api/v1/engagement/seed`.
#[derive(Debug, Default, Deserialize)]
pub struct SeedRequest {
    /// Records to generate. Defaults to `SEED_RECORD_COUNT`.
    pub count: Option<usize>,
    /// RNG seed for reproducible data.
    pub seed: Option<u64>,
    /// Clear existing records first. Defaults to `true`.
    pub replace: Option<bool>,
}

/// GET /api/v1/engagement
///
/// Most recent stored records, newest first.
pub async fn list_records(
    State(state): State<AppState>,
    Query(params): Query<EngagementListParams>,
) -> AppResult<impl IntoResponse> {
    let records = EngagementRepo::list_recent(&state.pool, params.limit).await?;

    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/engagement/summary
///
/// Average engagement per post type.
pub async fn summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let summary = EngagementRepo::summary_by_post_type(&state.pool).await?;

    Ok(Json(DataResponse { data: summary }))
}

/// POST /api/v1/engagement/seed
///
/// Generate mock records and push them to the store.
pub async fn seed_records(
    State(state): State<AppState>,
    Json(input): Json<SeedRequest>,
) -> AppResult<impl IntoResponse> {
    let count = input.count.unwrap_or(state.config.seed_record_count);
    if count == 0 || count > MAX_SEED_RECORDS {
        return Err(AppError::BadRequest(format!(
            "count must be between 1 and {MAX_SEED_RECORDS}"
        )));
    }

    let outcome = seed::reseed(
        &state.pool,
        count,
        input.seed,
        input.replace.unwrap_or(true),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome })))
}
