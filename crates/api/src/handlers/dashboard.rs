//! Handlers for the HTML dashboard.
//!
//! Flow failures never turn into error statuses here: like every other
//! outcome they are rendered into the page as a visible notice.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use sociallens_core::error::CoreError;
use sociallens_core::query::{Metric, PostTypeFilter, TrendPeriod, DEFAULT_METRICS};
use sociallens_langflow::insight::InsightError;

use crate::dashboard::{render_page, Notice, Tab, TabContent};
use crate::error::AppError;
use crate::handlers::insights;
use crate::session::{self, ChatEntry};
use crate::state::AppState;

const NO_ANALYSIS: &str = "Failed to get analysis results";
const NO_INSIGHTS: &str = "Could not generate insights";
const NO_TREND_ANALYSIS: &str = "Could not generate trend analysis";

// ---------------------------------------------------------------------------
// Form payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct TabQuery {
    pub tab: Option<String>,
}

/// Performance form. Metric checkboxes are separate fields because
/// urlencoded forms cannot carry repeated keys into a `Vec`.
///
/// Selections default to empty so a missing field renders as an invalid
/// selection instead of being rejected by the extractor.
#[derive(Debug, Deserialize)]
pub struct PerformanceForm {
    #[serde(default)]
    pub post_type: String,
    pub metric_engagement_rate: Option<String>,
    pub metric_likes: Option<String>,
    pub metric_comments: Option<String>,
    pub metric_shares: Option<String>,
}

impl PerformanceForm {
    fn selected_metrics(&self) -> Vec<Metric> {
        [
            (Metric::EngagementRate, &self.metric_engagement_rate),
            (Metric::Likes, &self.metric_likes),
            (Metric::Comments, &self.metric_comments),
            (Metric::Shares, &self.metric_shares),
        ]
        .into_iter()
        .filter(|(_, field)| field.is_some())
        .map(|(metric, _)| metric)
        .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct QuestionForm {
    #[serde(default)]
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct TrendForm {
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub metric: String,
    pub compare: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /
///
/// Render the requested tab with default selections.
pub async fn index(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<TabQuery>,
) -> impl IntoResponse {
    let (session_id, jar) = session::resolve_session(jar);

    let content = match Tab::from_query(params.tab.as_deref()) {
        Tab::Performance => TabContent::Performance {
            post_type: PostTypeFilter::AllTypes,
            metrics: DEFAULT_METRICS.to_vec(),
            result: None,
        },
        Tab::Insights => {
            let mut previous = state.sessions.history(session_id).await;
            previous.reverse();
            TabContent::Insights {
                question: String::new(),
                latest: None,
                previous,
            }
        }
        Tab::Trends => TabContent::Trends {
            period: TrendPeriod::Last7Days,
            metric: Metric::EngagementRate,
            compare: false,
            analysis: None,
        },
    };

    (
        jar,
        Html(render_page(&content, config_notice(&state).as_ref())),
    )
}

/// POST /performance
pub async fn performance(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<PerformanceForm>,
) -> impl IntoResponse {
    let (_, jar) = session::resolve_session(jar);
    let metrics = form.selected_metrics();

    let (post_type, outcome) = match form.post_type.parse::<PostTypeFilter>() {
        Ok(post_type) => (
            post_type,
            insights::analyze_performance(&state, post_type, &metrics).await,
        ),
        Err(e) => (PostTypeFilter::AllTypes, Err(AppError::Core(e))),
    };

    let (result, notice) = match outcome {
        Ok(analysis) => (Some(analysis), None),
        Err(e) => (None, Some(notice_for(e, NO_ANALYSIS))),
    };

    let metrics = if metrics.is_empty() {
        DEFAULT_METRICS.to_vec()
    } else {
        metrics
    };
    let content = TabContent::Performance {
        post_type,
        metrics,
        result,
    };

    (
        jar,
        Html(render_page(&content, notice.as_ref())),
    )
}

/// POST /insights
///
/// Answer a question and record it in the session's chat history.
pub async fn ask(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<QuestionForm>,
) -> impl IntoResponse {
    let (session_id, jar) = session::resolve_session(jar);

    let (latest, previous, notice, question) =
        match insights::ask_question(&state, &form.question).await {
            Ok(entry) => {
                let mut history = state.sessions.append(session_id, entry.clone()).await;
                // The newest entry is shown separately.
                history.pop();
                history.reverse();
                tracing::info!(session = %session_id, "Question answered");
                (Some(entry), history, None, String::new())
            }
            Err(e) => {
                let mut history: Vec<ChatEntry> = state.sessions.history(session_id).await;
                history.reverse();
                (None, history, Some(notice_for(e, NO_INSIGHTS)), form.question)
            }
        };

    let content = TabContent::Insights {
        question,
        latest,
        previous,
    };

    (
        jar,
        Html(render_page(&content, notice.as_ref())),
    )
}

/// POST /trends
pub async fn trends(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<TrendForm>,
) -> impl IntoResponse {
    let (_, jar) = session::resolve_session(jar);
    let compare = form.compare.is_some();

    let selection = form
        .period
        .parse::<TrendPeriod>()
        .and_then(|period| Ok((period, form.metric.parse::<Metric>()?)));

    let (period, metric, outcome) = match selection {
        Ok((period, metric)) => (
            period,
            metric,
            insights::analyze_trends(&state, metric, period, compare).await,
        ),
        Err(e) => (
            TrendPeriod::Last7Days,
            Metric::EngagementRate,
            Err(AppError::Core(e)),
        ),
    };

    let (analysis, notice) = match outcome {
        Ok(result) => (Some(result.message), None),
        Err(e) => (None, Some(notice_for(e, NO_TREND_ANALYSIS))),
    };

    let content = TabContent::Trends {
        period,
        metric,
        compare,
        analysis,
    };

    (
        jar,
        Html(render_page(&content, notice.as_ref())),
    )
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Warn up front when the flow cannot be reached at all.
fn config_notice(state: &AppState) -> Option<Notice> {
    state
        .insights
        .config_error()
        .map(|e| Notice::Error(format!("Configuration error: {e}")))
}

/// Translate a failure into the message shown on the page.
fn notice_for(err: AppError, no_message: &str) -> Notice {
    match err {
        AppError::Core(CoreError::Validation(msg)) => Notice::Warning(msg),
        AppError::Core(e @ CoreError::UnknownOption { .. }) => {
            Notice::Warning(format!("Invalid selection: {e}"))
        }
        AppError::Insight(InsightError::EmptyResponse) => Notice::Error(no_message.to_string()),
        AppError::Insight(e) => Notice::Error(e.to_string()),
        other => {
            tracing::error!(error = %other, "Dashboard request failed");
            Notice::Error(no_message.to_string())
        }
    }
}
