//! Engagement record rows and aggregates.

use serde::{Deserialize, Serialize};
use sociallens_core::engagement::{PostType, PostTypeSummary};
use sociallens_core::error::CoreError;
use sociallens_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `engagement_records` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EngagementRecord {
    pub id: DbId,
    pub account: String,
    pub post_type: String,
    pub likes: i64,
    pub shares: i64,
    pub comments: i64,
    pub impressions: i64,
    pub posted_at: Timestamp,
    pub created_at: Timestamp,
}

/// Per-post-type aggregate as returned by `summary_by_post_type`.
#[derive(Debug, Clone, FromRow)]
pub struct PostTypeSummaryRow {
    pub post_type: String,
    pub posts: i64,
    pub engagement_rate: f64,
    pub likes: f64,
    pub comments: f64,
    pub shares: f64,
}

impl TryFrom<PostTypeSummaryRow> for PostTypeSummary {
    type Error = CoreError;

    fn try_from(row: PostTypeSummaryRow) -> Result<Self, Self::Error> {
        Ok(PostTypeSummary {
            post_type: row.post_type.parse::<PostType>()?,
            posts: row.posts,
            engagement_rate: row.engagement_rate,
            likes: row.likes,
            comments: row.comments,
            shares: row.shares,
        })
    }
}

/// Query parameters for `GET /api/v1/engagement`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngagementListParams {
    /// Maximum rows. Defaults to 100.
    pub limit: Option<i64>,
}
