//! Prompt builders for the hosted insight flow.
//!
//! The dashboard never talks to the model directly; it phrases each
//! selection as a natural-language request and sends it to the flow.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Warning shown when the user submits an empty question.
pub const EMPTY_QUESTION_WARNING: &str = "Please enter a question";

/// Example questions listed on the insights tab.
pub const EXAMPLE_QUESTIONS: [&str; 6] = [
    "Which type of posts performed better and why?",
    "What are the key factors affecting engagement rates?",
    "How do carousel posts compare to video posts?",
    "What are the best practices for improving engagement?",
    "What time of day gets the most engagement?",
    "What content themes are most successful?",
];

/// Implements `as_str`, `ALL`, `Display`, `FromStr` and string serde for
/// a fieldless selection enum whose variants map to UI labels.
macro_rules! labelled_options {
    ($name:ident, $kind:literal, { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|o| o.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| CoreError::UnknownOption {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                raw.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

labelled_options!(PostTypeFilter, "post type", {
    AllTypes => "All Types",
    Carousel => "Carousel",
    Reels => "Reels",
    StaticImages => "Static Images",
    Stories => "Stories",
});

labelled_options!(Metric, "metric", {
    EngagementRate => "Engagement Rate",
    Likes => "Likes",
    Comments => "Comments",
    Shares => "Shares",
});

labelled_options!(TrendPeriod, "trend period", {
    Last7Days => "Last 7 days",
    Last30Days => "Last 30 days",
    Last3Months => "Last 3 months",
    LastYear => "Last year",
});

/// Metrics analysed when the user selects none.
pub const DEFAULT_METRICS: [Metric; 2] = [Metric::EngagementRate, Metric::Likes];

/// Build the performance-analysis request for a post type and metric set.
///
/// An empty `metrics` slice falls back to [`DEFAULT_METRICS`]. Duplicate
/// selections are collapsed, keeping first-seen order.
pub fn performance_query(post_type: PostTypeFilter, metrics: &[Metric]) -> String {
    let metrics: &[Metric] = if metrics.is_empty() {
        &DEFAULT_METRICS
    } else {
        metrics
    };

    let mut labels: Vec<&str> = Vec::with_capacity(metrics.len());
    for m in metrics {
        if !labels.contains(&m.as_str()) {
            labels.push(m.as_str());
        }
    }

    format!(
        "Analyze the performance metrics for {post_type} posts focusing on {}",
        labels.join(", ")
    )
}

/// Build the trend-analysis request.
pub fn trend_query(metric: Metric, period: TrendPeriod, compare: bool) -> String {
    let mut query = format!(
        "Analyze the {} trends for {}",
        metric.as_str().to_lowercase(),
        period.as_str().to_lowercase()
    );
    if compare {
        query.push_str(" and compare with the previous period");
    }
    query
}

/// Trim a free-form question, rejecting blank input.
pub fn normalize_question(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(EMPTY_QUESTION_WARNING.to_string()));
    }
    Ok(trimmed.to_string())
}
