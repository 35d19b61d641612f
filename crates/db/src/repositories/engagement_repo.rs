//! Repository for the `engagement_records` table.

use sociallens_core::engagement::{NewEngagementRecord, PostTypeSummary};
use sqlx::{PgConnection, PgPool};

use crate::models::engagement::{EngagementRecord, PostTypeSummaryRow};

/// Column list for `engagement_records` queries.
const COLUMNS: &str = "\
    id, account, post_type, likes, shares, comments, impressions, \
    posted_at, created_at";

/// Default page size for listing.
const DEFAULT_LIMIT: i64 = 100;

/// Maximum page size for listing.
const MAX_LIMIT: i64 = 1_000;

/// Provides storage and aggregation of engagement records.
pub struct EngagementRepo;

impl EngagementRepo {
    /// Insert records in a single transaction. Returns the number inserted.
    pub async fn insert_batch(
        pool: &PgPool,
        records: &[NewEngagementRecord],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let inserted = Self::insert_all(&mut tx, records).await?;
        tx.commit().await?;

        tracing::debug!(inserted, "Engagement records stored");
        Ok(inserted)
    }

    /// Swap the whole table for `records` in one transaction.
    ///
    /// Returns `(deleted, inserted)`. On failure the previous rows remain.
    pub async fn replace_all(
        pool: &PgPool,
        records: &[NewEngagementRecord],
    ) -> Result<(u64, u64), sqlx::Error> {
        let mut tx = pool.begin().await?;
        let deleted = sqlx::query("DELETE FROM engagement_records")
            .execute(&mut *tx)
            .await?
            .rows_affected();
        let inserted = Self::insert_all(&mut tx, records).await?;
        tx.commit().await?;

        tracing::debug!(deleted, inserted, "Engagement records replaced");
        Ok((deleted, inserted))
    }

    async fn insert_all(
        conn: &mut PgConnection,
        records: &[NewEngagementRecord],
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for record in records {
            let result = sqlx::query(
                "INSERT INTO engagement_records \
                 (account, post_type, likes, shares, comments, impressions, posted_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7)",
            )
            .bind(&record.account)
            .bind(record.post_type.as_str())
            .bind(record.likes)
            .bind(record.shares)
            .bind(record.comments)
            .bind(record.impressions)
            .bind(record.posted_at)
            .execute(&mut *conn)
            .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    /// Most recent records first, by `posted_at`.
    pub async fn list_recent(
        pool: &PgPool,
        limit: Option<i64>,
    ) -> Result<Vec<EngagementRecord>, sqlx::Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let query = format!(
            "SELECT {COLUMNS} FROM engagement_records \
             ORDER BY posted_at DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, EngagementRecord>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM engagement_records")
            .fetch_one(pool)
            .await
    }

    /// Average engagement per post type, in Images, Videos, Carousels order.
    ///
    /// Rows whose `post_type` fails to parse are logged and dropped.
    pub async fn summary_by_post_type(pool: &PgPool) -> Result<Vec<PostTypeSummary>, sqlx::Error> {
        let rows = sqlx::query_as::<_, PostTypeSummaryRow>(
            "SELECT post_type, \
                    COUNT(*) AS posts, \
                    AVG((likes + comments + shares)::float8 / impressions * 100) AS engagement_rate, \
                    AVG(likes)::float8 AS likes, \
                    AVG(comments)::float8 AS comments, \
                    AVG(shares)::float8 AS shares \
             FROM engagement_records \
             GROUP BY post_type \
             ORDER BY CASE post_type \
                 WHEN 'Images' THEN 1 \
                 WHEN 'Videos' THEN 2 \
                 WHEN 'Carousels' THEN 3 \
                 ELSE 4 END",
        )
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(|row| match PostTypeSummary::try_from(row) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping unrecognised post type in summary");
                    None
                }
            })
            .collect())
    }
}
