//! Engagement records and the mock data generator.
//!
//! The dashboard has no real social-network integration: engagement
//! numbers are synthesized by [`MockGenerator`] and pushed to the store
//! so the hosted insight flow has something to reason about.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Mock account handles that generated posts are attributed to.
pub const MOCK_ACCOUNTS: [&str; 6] = [
    "@urban_threads",
    "@daily_grind_cafe",
    "@trailhead_outfitters",
    "@pixel_pantry",
    "@moonlit_ceramics",
    "@north_loop_fitness",
];

/// Generated posts are spread over this many days before "now".
const POSTING_WINDOW_DAYS: i64 = 30;

const MIN_IMPRESSIONS: i64 = 5_000;
const MAX_IMPRESSIONS: i64 = 60_000;

// ---------------------------------------------------------------------------
// PostType
// ---------------------------------------------------------------------------

/// Kind of post an engagement record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostType {
    Images,
    Videos,
    Carousels,
}

impl PostType {
    /// All post types in display order.
    pub const ALL: [PostType; 3] = [PostType::Images, PostType::Videos, PostType::Carousels];

    pub fn as_str(self) -> &'static str {
        match self {
            PostType::Images => "Images",
            PostType::Videos => "Videos",
            PostType::Carousels => "Carousels",
        }
    }

    /// Per-impression rate ranges `(likes, comments, shares)` used by the
    /// generator. Carousels engage best, images worst.
    fn profile(self) -> EngagementProfile {
        match self {
            PostType::Images => EngagementProfile {
                likes: (0.012, 0.024),
                comments: (0.0005, 0.0015),
                shares: (0.0003, 0.0010),
            },
            PostType::Videos => EngagementProfile {
                likes: (0.016, 0.030),
                comments: (0.0008, 0.0020),
                shares: (0.0010, 0.0030),
            },
            PostType::Carousels => EngagementProfile {
                likes: (0.020, 0.034),
                comments: (0.0010, 0.0030),
                shares: (0.0008, 0.0025),
            },
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CoreError::UnknownOption {
                kind: "post type",
                value: s.to_string(),
            })
    }
}

struct EngagementProfile {
    likes: (f64, f64),
    comments: (f64, f64),
    shares: (f64, f64),
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A generated engagement record that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEngagementRecord {
    pub account: String,
    pub post_type: PostType,
    pub likes: i64,
    pub shares: i64,
    pub comments: i64,
    pub impressions: i64,
    pub posted_at: Timestamp,
}

impl NewEngagementRecord {
    /// `(likes + comments + shares) / impressions` as a percentage.
    pub fn engagement_rate(&self) -> f64 {
        engagement_rate(self.likes, self.comments, self.shares, self.impressions)
    }
}

/// Engagement rate as a percentage. Zero impressions yield `0.0`.
pub fn engagement_rate(likes: i64, comments: i64, shares: i64, impressions: i64) -> f64 {
    if impressions <= 0 {
        return 0.0;
    }
    (likes + comments + shares) as f64 / impressions as f64 * 100.0
}

/// Averages for one post type across a set of records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostTypeSummary {
    pub post_type: PostType,
    pub posts: i64,
    pub engagement_rate: f64,
    pub likes: f64,
    pub comments: f64,
    pub shares: f64,
}

/// Group records by post type and average them.
///
/// Output follows [`PostType::ALL`] order; types with no records are
/// omitted.
pub fn summarize(records: &[NewEngagementRecord]) -> Vec<PostTypeSummary> {
    PostType::ALL
        .into_iter()
        .filter_map(|post_type| {
            let group: Vec<&NewEngagementRecord> =
                records.iter().filter(|r| r.post_type == post_type).collect();
            if group.is_empty() {
                return None;
            }
            let n = group.len() as f64;
            let mean = |f: fn(&NewEngagementRecord) -> f64| group.iter().map(|r| f(r)).sum::<f64>() / n;

            Some(PostTypeSummary {
                post_type,
                posts: group.len() as i64,
                engagement_rate: mean(NewEngagementRecord::engagement_rate),
                likes: mean(|r| r.likes as f64),
                comments: mean(|r| r.comments as f64),
                shares: mean(|r| r.shares as f64),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// MockGenerator
// ---------------------------------------------------------------------------

/// Produces plausible engagement numbers for the mock accounts.
///
/// A fixed seed makes the output reproducible for a given "now".
pub struct MockGenerator {
    rng: StdRng,
}

impl MockGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Generate `count` records posted within the 30 days before `now`.
    pub fn generate(&mut self, count: usize, now: Timestamp) -> Vec<NewEngagementRecord> {
        (0..count).map(|_| self.next_record(now)).collect()
    }

    fn next_record(&mut self, now: Timestamp) -> NewEngagementRecord {
        let account = MOCK_ACCOUNTS[self.rng.random_range(0..MOCK_ACCOUNTS.len())];
        let post_type = PostType::ALL[self.rng.random_range(0..PostType::ALL.len())];
        let profile = post_type.profile();
        let impressions = self.rng.random_range(MIN_IMPRESSIONS..=MAX_IMPRESSIONS);

        let likes = self.scaled(impressions, profile.likes);
        let comments = self.scaled(impressions, profile.comments);
        let shares = self.scaled(impressions, profile.shares);

        let age_secs = self
            .rng
            .random_range(0..POSTING_WINDOW_DAYS * 24 * 60 * 60);

        NewEngagementRecord {
            account: account.to_string(),
            post_type,
            likes,
            shares,
            comments,
            impressions,
            posted_at: now - Duration::seconds(age_secs),
        }
    }

    fn scaled(&mut self, impressions: i64, (low, high): (f64, f64)) -> i64 {
        let rate = self.rng.random_range(low..high);
        (impressions as f64 * rate).round() as i64
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
