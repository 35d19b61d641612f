//! Page layout and per-tab rendering.

use std::fmt::Write;

use sociallens_core::metrics::{format_count, MetricsSource};
use sociallens_core::query::{Metric, PostTypeFilter, TrendPeriod, EXAMPLE_QUESTIONS};

use super::charts::bar_chart;
use super::html::{escape, format_text};
use crate::handlers::insights::PerformanceAnalysis;
use crate::session::ChatEntry;

const PAGE_TITLE: &str = "Social Media Analytics Dashboard";

const STYLES: &str = r#"
body { background-color: #1a1a1a; color: #ffffff; font-family: system-ui, sans-serif; margin: 0; padding: 2rem; }
h1 { font-size: 2.5rem; font-weight: 600; margin-bottom: 2rem; }
h2 { margin-bottom: 1.5rem; }
h3 { margin: 2rem 0 1rem; }
.tabs { display: flex; gap: 2rem; background-color: #2d2d2d; padding: 1rem; border-radius: 10px; }
.tabs a { color: #ffffff; text-decoration: none; font-weight: 500; padding-bottom: 0.25rem; }
.tabs a.active { border-bottom: 2px solid #ff4b4b; }
form { display: flex; flex-wrap: wrap; gap: 1.5rem; align-items: flex-end; margin-top: 1rem; }
label { color: #b3b3b3; display: block; margin-bottom: 0.5rem; }
select, input[type=text] { background-color: #2d2d2d; color: #ffffff; border: 1px solid #404040; border-radius: 8px; padding: 0.5rem; min-width: 16rem; }
button { background-color: #ff4b4b; color: white; border: none; padding: 0.75rem 1.5rem; border-radius: 8px; font-weight: 600; cursor: pointer; }
button:hover { background-color: #ff3333; }
.kpis { display: grid; grid-template-columns: repeat(4, 1fr); gap: 1rem; }
.metric-card { background-color: #2d2d2d; border-radius: 10px; padding: 1.5rem; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.1); }
.metric-value { font-size: 2rem; font-weight: 700; margin: 0.5rem 0; }
.metric-label { font-size: 1rem; color: #b3b3b3; }
.chat-container { background-color: #2d2d2d; border-radius: 10px; padding: 1.5rem; margin-top: 1rem; }
.chat-message { padding: 1rem; border-radius: 8px; margin-bottom: 1rem; background-color: #404040; }
.chat-history { max-height: 400px; overflow-y: auto; padding: 1rem; background-color: #2d2d2d; border-radius: 10px; }
.charts { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
.chart { width: 100%; height: auto; border-radius: 10px; }
.notice { padding: 1rem; border-radius: 8px; margin-top: 1rem; }
.notice.error { background-color: #5c1f1f; border: 1px solid #ff4b4b; }
.notice.warning { background-color: #5c4a1f; border: 1px solid #ffb84b; }
.source { color: #b3b3b3; font-size: 0.9rem; }
.hint { color: #b3b3b3; }
footer { text-align: center; padding: 2rem 0; color: #b3b3b3; font-size: 0.9rem; }
"#;

/// Dashboard tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Performance,
    Insights,
    Trends,
}

impl Tab {
    const ALL: [Tab; 3] = [Tab::Performance, Tab::Insights, Tab::Trends];

    /// Parse the `?tab=` query value; anything unknown opens the first tab.
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("insights") => Tab::Insights,
            Some("trends") => Tab::Trends,
            _ => Tab::Performance,
        }
    }

    fn slug(self) -> &'static str {
        match self {
            Tab::Performance => "performance",
            Tab::Insights => "insights",
            Tab::Trends => "trends",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Tab::Performance => "📊 Performance Analysis",
            Tab::Insights => "💡 Insights Q&A",
            Tab::Trends => "📈 Trends",
        }
    }
}

/// A message shown above the tab's results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Warning(String),
}

/// What the active tab shows.
pub enum TabContent {
    Performance {
        post_type: PostTypeFilter,
        metrics: Vec<Metric>,
        result: Option<PerformanceAnalysis>,
    },
    Insights {
        question: String,
        latest: Option<ChatEntry>,
        /// Earlier entries, newest first.
        previous: Vec<ChatEntry>,
    },
    Trends {
        period: TrendPeriod,
        metric: Metric,
        compare: bool,
        analysis: Option<String>,
    },
}

impl TabContent {
    fn tab(&self) -> Tab {
        match self {
            TabContent::Performance { .. } => Tab::Performance,
            TabContent::Insights { .. } => Tab::Insights,
            TabContent::Trends { .. } => Tab::Trends,
        }
    }
}

/// Render a complete HTML document for the given tab content.
pub fn render_page(content: &TabContent, notice: Option<&Notice>) -> String {
    let active = content.tab();

    let mut nav = String::new();
    for tab in Tab::ALL {
        let class = if tab == active { r#" class="active""# } else { "" };
        let _ = write!(
            nav,
            r#"<a href="/?tab={slug}"{class}>{label}</a>"#,
            slug = tab.slug(),
            label = tab.label(),
        );
    }

    let notice_html = notice.map(render_notice).unwrap_or_default();

    let body = match content {
        TabContent::Performance {
            post_type,
            metrics,
            result,
        } => render_performance(*post_type, metrics, result.as_ref(), &notice_html),
        TabContent::Insights {
            question,
            latest,
            previous,
        } => render_insights(question, latest.as_ref(), previous, &notice_html),
        TabContent::Trends {
            period,
            metric,
            compare,
            analysis,
        } => render_trends(*period, *metric, *compare, analysis.as_deref(), &notice_html),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<style>{STYLES}</style>
</head>
<body>
<h1>📱 Social Media Performance Analytics</h1>
<nav class="tabs">{nav}</nav>
<main>{body}</main>
<footer>SocialLens engagement analytics</footer>
</body>
</html>"#
    )
}

fn render_notice(notice: &Notice) -> String {
    let (class, text) = match notice {
        Notice::Error(text) => ("error", text),
        Notice::Warning(text) => ("warning", text),
    };
    format!(
        r#"<div class="notice {class}" role="alert">{}</div>"#,
        escape(text)
    )
}

fn select<T: Copy + PartialEq + std::fmt::Display>(name: &str, options: &[T], selected: T) -> String {
    let mut html = format!(r#"<select name="{name}" id="{name}">"#);
    for option in options {
        let attr = if *option == selected { " selected" } else { "" };
        let label = escape(&option.to_string());
        let _ = write!(html, r#"<option value="{label}"{attr}>{label}</option>"#);
    }
    html.push_str("</select>");
    html
}

// ---------------------------------------------------------------------------
// Performance tab
// ---------------------------------------------------------------------------

/// Form field name for a metric checkbox.
pub fn metric_field(metric: Metric) -> &'static str {
    match metric {
        Metric::EngagementRate => "metric_engagement_rate",
        Metric::Likes => "metric_likes",
        Metric::Comments => "metric_comments",
        Metric::Shares => "metric_shares",
    }
}

fn render_performance(
    post_type: PostTypeFilter,
    metrics: &[Metric],
    result: Option<&PerformanceAnalysis>,
    notice: &str,
) -> String {
    let mut checkboxes = String::new();
    for metric in Metric::ALL {
        let checked = if metrics.contains(metric) { " checked" } else { "" };
        let _ = write!(
            checkboxes,
            r#"<label><input type="checkbox" name="{field}" value="on"{checked}> {metric}</label>"#,
            field = metric_field(*metric),
        );
    }

    let mut html = format!(
        r#"<h2>Post Type Performance Analysis</h2>
<form method="post" action="/performance">
<div><label for="post_type">Select Post Type</label>{select}</div>
<div><label>Select Metrics</label>{checkboxes}</div>
<button type="submit">Analyze Performance</button>
</form>{notice}"#,
        select = select("post_type", PostTypeFilter::ALL, post_type),
    );

    if let Some(result) = result {
        html.push_str("<h3>Key Performance Indicators</h3><div class=\"kpis\">");
        for kpi in &result.kpis {
            let _ = write!(
                html,
                r#"<div class="metric-card"><div class="metric-label">{}</div><div class="metric-value">{}</div></div>"#,
                escape(kpi.label),
                escape(&kpi.value),
            );
        }
        html.push_str("</div>");

        let source = match result.metrics.source {
            MetricsSource::Insight => "Figures reported by the analysis.",
            MetricsSource::Store => "Figures computed from stored engagement data.",
            MetricsSource::Baseline => "Baseline figures; no engagement data available.",
        };
        let _ = write!(
            html,
            r#"<p class="source">{source}</p><h3>Analysis Insights</h3><div class="chat-container">{}</div>"#,
            format_text(&result.message),
        );

        let rates: Vec<(String, f64)> = result
            .metrics
            .rows
            .iter()
            .map(|r| (r.post_type.clone(), r.engagement_rate))
            .collect();
        let likes: Vec<(String, f64)> = result
            .metrics
            .rows
            .iter()
            .map(|r| (r.post_type.clone(), r.likes))
            .collect();

        let _ = write!(
            html,
            r#"<h3>Performance Visualizations</h3><div class="charts">{}{}</div>"#,
            bar_chart("Engagement Rate by Post Type", &rates, |v| format!("{v:.2}%")),
            bar_chart("Average Likes by Post Type", &likes, format_count),
        );
    }

    html
}

// ---------------------------------------------------------------------------
// Insights tab
// ---------------------------------------------------------------------------

fn render_insights(
    question: &str,
    latest: Option<&ChatEntry>,
    previous: &[ChatEntry],
    notice: &str,
) -> String {
    let examples: String = EXAMPLE_QUESTIONS
        .iter()
        .map(|q| format!("<li>{}</li>", escape(q)))
        .collect();

    let mut html = format!(
        r#"<h2>Ask Questions &amp; Get Insights</h2>
<div class="hint">Example questions you can ask:<ul>{examples}</ul></div>
<form method="post" action="/insights">
<div><label for="question">Enter your question</label><input type="text" id="question" name="question" placeholder="Type your question here..." value="{value}"></div>
<button type="submit">Get Insights</button>
</form>{notice}"#,
        value = escape(question),
    );

    if let Some(entry) = latest {
        let _ = write!(
            html,
            r#"<div class="chat-container"><div class="chat-message"><strong>Question:</strong><br>{}</div><div class="chat-message"><strong>Answer:</strong><br>{}</div></div>"#,
            format_text(&entry.question),
            format_text(&entry.answer),
        );
    }

    if !previous.is_empty() {
        html.push_str(r#"<h3>Previous Questions</h3><details open><summary>View Chat History</summary><div class="chat-history">"#);
        for entry in previous {
            let _ = write!(
                html,
                r#"<div class="chat-message"><small>{}</small><br><strong>Q:</strong> {}<br><strong>A:</strong> {}</div>"#,
                escape(&entry.timestamp),
                format_text(&entry.question),
                format_text(&entry.answer),
            );
        }
        html.push_str("</div></details>");
    }

    html
}

// ---------------------------------------------------------------------------
// Trends tab
// ---------------------------------------------------------------------------

fn render_trends(
    period: TrendPeriod,
    metric: Metric,
    compare: bool,
    analysis: Option<&str>,
    notice: &str,
) -> String {
    let checked = if compare { " checked" } else { "" };

    let mut html = format!(
        r#"<h2>Engagement Trends Analysis</h2>
<form method="post" action="/trends">
<div><label for="period">Select Time Period</label>{period_select}</div>
<div><label for="metric">Select Metric</label>{metric_select}</div>
<div><label><input type="checkbox" name="compare" value="on"{checked}> Compare with previous period</label></div>
<button type="submit">Analyze Trends</button>
</form>{notice}"#,
        period_select = select("period", TrendPeriod::ALL, period),
        metric_select = select("metric", Metric::ALL, metric),
    );

    if let Some(text) = analysis {
        let _ = write!(
            html,
            r#"<div class="chat-container"><div class="chat-message"><strong>Trend Analysis:</strong><br>{}</div></div>"#,
            format_text(text),
        );
    }

    html
}
