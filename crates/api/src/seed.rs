//! Pushing mock engagement data into the store.

use serde::Serialize;
use sociallens_core::engagement::MockGenerator;
use sociallens_db::repositories::EngagementRepo;
use sociallens_db::DbPool;

/// Upper bound on records generated by a single seeding request.
pub const MAX_SEED_RECORDS: usize = 5_000;

/// Result of a seeding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedOutcome {
    pub deleted: u64,
    pub inserted: u64,
}

/// Generate `count` records and store them, optionally replacing the
/// existing ones in the same transaction.
pub async fn reseed(
    pool: &DbPool,
    count: usize,
    seed: Option<u64>,
    replace: bool,
) -> Result<SeedOutcome, sqlx::Error> {
    let records = MockGenerator::new(seed).generate(count, chrono::Utc::now());

    let (deleted, inserted) = if replace {
        EngagementRepo::replace_all(pool, &records).await?
    } else {
        (0, EngagementRepo::insert_batch(pool, &records).await?)
    };

    tracing::info!(deleted, inserted, ?seed, "Mock engagement data pushed");
    Ok(SeedOutcome { deleted, inserted })
}

/// Seed the store at startup unless it already holds data.
///
/// Returns the number of records inserted.
pub async fn seed_if_empty(pool: &DbPool, count: usize) -> Result<u64, sqlx::Error> {
    let existing = EngagementRepo::count(pool).await?;
    if existing > 0 {
        tracing::info!(existing, "Engagement store already populated, skipping seed");
        return Ok(0);
    }

    let outcome = reseed(pool, count, None, false).await?;
    Ok(outcome.inserted)
}
