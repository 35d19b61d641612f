//! Metrics reported by the insight flow.
//!
//! The flow answers in prose, but a well-behaved prompt makes it emit one
//! bold line per post type, e.g.
//!
//! ```text
//! **Carousels:** 12 posts, average engagement rate: 2.62%, average likes: 3,200, average comments: 150, average shares: 95
//! ```
//!
//! Those lines are parsed into a [`MetricsTable`]. When the answer has
//! none, the table falls back to the stored engagement summary, and to a
//! fixed baseline when the store is empty too.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use crate::engagement::{PostType, PostTypeSummary};

static METRIC_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\*\*(Images|Videos|Carousels):\*\* (\d+) posts, average engagement rate: ([\d.]+)%, average likes: ([\d,.]+), average comments: ([\d,.]+), average shares: ([\d,.]+)",
    )
    .expect("valid regex")
});

/// Rows used when neither the flow nor the store provides any numbers.
const BASELINE_ROWS: [(&str, f64, f64, f64); 3] = [
    ("All Types", 2.36, 2660.9, 107.4),
    ("Carousel Posts", 2.62, 3200.0, 150.0),
    ("Video Posts", 2.10, 2500.0, 80.0),
];

/// One row of the metrics table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRow {
    pub post_type: String,
    pub posts: Option<i64>,
    pub engagement_rate: f64,
    pub likes: f64,
    pub comments: f64,
    pub shares: Option<f64>,
}

/// Where the numbers in a [`MetricsTable`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricsSource {
    /// Parsed from the flow's answer.
    Insight,
    /// Aggregated from the engagement store.
    Store,
    /// Fixed baseline numbers.
    Baseline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsTable {
    pub source: MetricsSource,
    pub rows: Vec<MetricsRow>,
}

/// A formatted key performance indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Kpi {
    pub label: &'static str,
    pub value: String,
}

/// Extract per-post-type metric lines from the flow's answer.
///
/// Only the first line for each type counts. Rows come back in
/// [`PostType::ALL`] order regardless of where they appear in the text.
/// Lines whose numbers fail to parse are skipped.
pub fn parse_post_type_metrics(text: &str) -> Vec<MetricsRow> {
    let mut found: Vec<(PostType, MetricsRow)> = Vec::new();

    for caps in METRIC_LINE_RE.captures_iter(text) {
        let Ok(post_type) = caps[1].parse::<PostType>() else {
            continue;
        };
        if found.iter().any(|(t, _)| *t == post_type) {
            continue;
        }
        if let Some(row) = parse_row(post_type, &caps) {
            found.push((post_type, row));
        }
    }

    PostType::ALL
        .into_iter()
        .filter_map(|t| {
            found
                .iter()
                .position(|(ft, _)| *ft == t)
                .map(|i| found[i].1.clone())
        })
        .collect()
}

/// Convert one matched metric line. `None` when a number fails to parse.
fn parse_row(post_type: PostType, caps: &Captures<'_>) -> Option<MetricsRow> {
    Some(MetricsRow {
        post_type: post_type.as_str().to_string(),
        posts: caps[2].parse().ok(),
        engagement_rate: parse_number(&caps[3])?,
        likes: parse_number(&caps[4])?,
        comments: parse_number(&caps[5])?,
        shares: Some(parse_number(&caps[6])?),
    })
}

/// The table reported by an answer, if it carries any metric lines.
pub fn insight_table(answer: &str) -> Option<MetricsTable> {
    let rows = parse_post_type_metrics(answer);
    if rows.is_empty() {
        return None;
    }
    Some(MetricsTable {
        source: MetricsSource::Insight,
        rows,
    })
}

/// The table used when the answer has no metrics: the store summary, or
/// the baseline when the store is empty.
pub fn fallback_table(store_summary: &[PostTypeSummary]) -> MetricsTable {
    if store_summary.is_empty() {
        return MetricsTable {
            source: MetricsSource::Baseline,
            rows: baseline_rows(),
        };
    }

    let rows = store_summary
        .iter()
        .map(|s| MetricsRow {
            post_type: s.post_type.as_str().to_string(),
            posts: Some(s.posts),
            engagement_rate: s.engagement_rate,
            likes: s.likes,
            comments: s.comments,
            shares: Some(s.shares),
        })
        .collect();
    MetricsTable {
        source: MetricsSource::Store,
        rows,
    }
}

fn baseline_rows() -> Vec<MetricsRow> {
    BASELINE_ROWS
        .iter()
        .map(|&(post_type, engagement_rate, likes, comments)| MetricsRow {
            post_type: post_type.to_string(),
            posts: None,
            engagement_rate,
            likes,
            comments,
            shares: None,
        })
        .collect()
}

impl MetricsTable {
    /// Averages across rows, formatted for the KPI cards.
    pub fn kpis(&self) -> Vec<Kpi> {
        let mean = |values: Vec<f64>| -> Option<f64> {
            if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            }
        };

        let rate = mean(self.rows.iter().map(|r| r.engagement_rate).collect());
        let likes = mean(self.rows.iter().map(|r| r.likes).collect());
        let comments = mean(self.rows.iter().map(|r| r.comments).collect());
        let shares = mean(self.rows.iter().filter_map(|r| r.shares).collect());

        vec![
            Kpi {
                label: "Average Engagement Rate",
                value: rate.map_or_else(not_available, |v| format!("{v:.2}%")),
            },
            Kpi {
                label: "Average Likes",
                value: likes.map_or_else(not_available, format_count),
            },
            Kpi {
                label: "Average Comments",
                value: comments.map_or_else(not_available, format_count),
            },
            Kpi {
                label: "Average Shares",
                value: shares.map_or_else(not_available, format_count),
            },
        ]
    }
}

fn not_available() -> String {
    "n/a".to_string()
}

/// Strip thousands separators and parse.
fn parse_number(raw: &str) -> Option<f64> {
    raw.replace(',', "").parse().ok()
}

/// Round to a whole number and insert thousands separators: `2660.9` → `"2,661"`.
pub fn format_count(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANSWER: &str = "\
Here is the breakdown:\n\
**Carousels:** 12 posts, average engagement rate: 2.62%, average likes: 3,200, average comments: 150, average shares: 95\n\
**Images:** 20 posts, average engagement rate: 1.85%, average likes: 1,204.5, average comments: 61, average shares: 22\n\
Carousels clearly lead.";

    #[test]
    fn parses_rows_in_display_order() {
        let rows = parse_post_type_metrics(ANSWER);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].post_type, "Images");
        assert_eq!(rows[0].posts, Some(20));
        assert!((rows[0].likes - 1204.5).abs() < 1e-9);
        assert_eq!(rows[1].post_type, "Carousels");
        assert!((rows[1].engagement_rate - 2.62).abs() < 1e-9);
        assert!((rows[1].likes - 3200.0).abs() < 1e-9);
        assert_eq!(rows[1].shares, Some(95.0));
    }

    #[test]
    fn first_line_per_type_wins() {
        let text = "\
**Videos:** 3 posts, average engagement rate: 2.00%, average likes: 10, average comments: 1, average shares: 1\n\
**Videos:** 9 posts, average engagement rate: 9.00%, average likes: 90, average comments: 9, average shares: 9";
        let rows = parse_post_type_metrics(text);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].posts, Some(3));
    }

    #[test]
    fn malformed_numbers_are_skipped() {
        let text = "**Videos:** 3 posts, average engagement rate: 2.0.1%, average likes: 10, average comments: 1, average shares: 1";
        assert!(parse_post_type_metrics(text).is_empty());
    }

    #[test]
    fn table_prefers_parsed_answer() {
        let table = insight_table(ANSWER).unwrap();
        assert_eq!(table.source, MetricsSource::Insight);
        assert_eq!(table.rows.len(), 2);
        assert!(insight_table("No numbers today.").is_none());
    }

    #[test]
    fn table_falls_back_to_store_summary() {
        let summary = vec![PostTypeSummary {
            post_type: PostType::Videos,
            posts: 4,
            engagement_rate: 2.4,
            likes: 800.0,
            comments: 40.0,
            shares: 30.0,
        }];
        let table = fallback_table(&summary);

        assert_eq!(table.source, MetricsSource::Store);
        assert_eq!(table.rows[0].post_type, "Videos");
        assert_eq!(table.rows[0].shares, Some(30.0));
    }

    #[test]
    fn table_falls_back_to_baseline() {
        let table = fallback_table(&[]);
        assert_eq!(table.source, MetricsSource::Baseline);
        assert_eq!(table.rows.len(), 3);
        assert_eq!(table.rows[0].post_type, "All Types");
    }

    #[test]
    fn baseline_kpis_match_expected_formatting() {
        let kpis = fallback_table(&[]).kpis();

        assert_eq!(kpis[0].label, "Average Engagement Rate");
        assert_eq!(kpis[0].value, "2.36%");
        assert_eq!(kpis[1].value, "2,787");
        assert_eq!(kpis[2].value, "112");
        assert_eq!(kpis[3].value, "n/a");
    }

    #[test]
    fn format_count_inserts_separators() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.4), "999");
        assert_eq!(format_count(2660.9), "2,661");
        assert_eq!(format_count(1_234_567.0), "1,234,567");
        assert_eq!(format_count(-4321.0), "-4,321");
    }
}
