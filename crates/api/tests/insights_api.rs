//! Integration tests for the `/api/v1/insights` endpoints.
//!
//! The hosted flow is replaced by a wiremock server. The engagement store
//! points at a closed port so any fallback to it degrades to the baseline.

mod common;

use axum::http::StatusCode;
use common::{body_json, chat_response, post_json, RUN_PATH};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CAROUSEL_ANSWER: &str = "Here is the breakdown:\n\
**Carousels:** 12 posts, average engagement rate: 3.10%, average likes: 3500, average comments: 140, average shares: 60";

// ---------------------------------------------------------------------------
// Performance
// ---------------------------------------------------------------------------

#[tokio::test]
async fn performance_parses_metrics_from_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RUN_PATH))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_partial_json(json!({
            "input_value": "Analyze the performance metrics for Carousel posts focusing on Likes, Shares",
            "output_type": "chat",
            "input_type": "chat",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(CAROUSEL_ANSWER)))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::build_test_app(common::unreachable_pool(), common::configured_insights(&server));
    let response = post_json(
        app,
        "/api/v1/insights/performance",
        json!({ "post_type": "Carousel", "metrics": ["Likes", "Shares", "Likes"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["message"], CAROUSEL_ANSWER);
    assert_eq!(data["metrics"]["source"], "insight");
    assert_eq!(data["metrics"]["rows"][0]["post_type"], "Carousels");
    assert_eq!(data["metrics"]["rows"][0]["posts"], 12);
    assert_eq!(data["kpis"][0]["value"], "3.10%");
    assert_eq!(data["kpis"][1]["value"], "3,500");
    assert_eq!(data["kpis"][3]["value"], "60");
}

#[tokio::test]
async fn performance_defaults_metrics_and_falls_back_to_baseline() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RUN_PATH))
        .and(body_partial_json(json!({
            "input_value": "Analyze the performance metrics for All Types posts focusing on Engagement Rate, Likes",
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_response("Carousels perform best overall.")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let app = common::build_test_app(common::unreachable_pool(), common::configured_insights(&server));
    let response = post_json(app, "/api/v1/insights/performance", json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let data = &json["data"];
    assert_eq!(data["metrics"]["source"], "baseline");
    assert_eq!(data["metrics"]["rows"].as_array().unwrap().len(), 3);
    assert_eq!(data["kpis"][0]["value"], "2.36%");
    assert_eq!(data["kpis"][3]["value"], "n/a");
}

#[tokio::test]
async fn performance_without_credentials_returns_503() {
    let app = common::build_test_app(common::unreachable_pool(), common::unconfigured_insights());

    let response = post_json(app, "/api/v1/insights/performance", json!({})).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "CONFIGURATION_ERROR");
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("Configuration error:"), "got: {error}");
    assert!(error.contains("APPLICATION_TOKEN"));
}

#[tokio::test]
async fn unknown_post_type_is_rejected_before_the_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = common::build_test_app(common::unreachable_pool(), common::configured_insights(&server));
    let response = post_json(
        app,
        "/api/v1/insights/performance",
        json!({ "post_type": "Podcasts" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Ask
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ask_returns_trimmed_question_and_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RUN_PATH))
        .and(body_partial_json(json!({ "input_value": "Which post type works best?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("Carousels.")))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::build_test_app(common::unreachable_pool(), common::configured_insights(&server));
    let response = post_json(
        app,
        "/api/v1/insights/ask",
        json!({ "question": "  Which post type works best?  " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["question"], "Which post type works best?");
    assert_eq!(json["data"]["answer"], "Carousels.");
    assert_eq!(json["data"]["timestamp"].as_str().unwrap().len(), 8);
}

#[tokio::test]
async fn blank_question_returns_400_without_calling_the_flow() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = common::build_test_app(common::unreachable_pool(), common::configured_insights(&server));
    let response = post_json(app, "/api/v1/insights/ask", json!({ "question": "   " })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Please enter a question");
}

#[tokio::test]
async fn upstream_failure_returns_502() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RUN_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("flow crashed"))
        .mount(&server)
        .await;

    let app = common::build_test_app(common::unreachable_pool(), common::configured_insights(&server));
    let response = post_json(app, "/api/v1/insights/ask", json!({ "question": "Why?" })).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UPSTREAM_ERROR");
    let error = json["error"].as_str().unwrap();
    assert!(error.starts_with("API Error:"), "got: {error}");
    assert!(error.contains("flow crashed"));
}

#[tokio::test]
async fn response_without_message_returns_502() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RUN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "outputs": [] })))
        .mount(&server)
        .await;

    let app = common::build_test_app(common::unreachable_pool(), common::configured_insights(&server));
    let response = post_json(app, "/api/v1/insights/ask", json!({ "question": "Why?" })).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "EMPTY_RESPONSE");
}

// ---------------------------------------------------------------------------
// Trends
// ---------------------------------------------------------------------------

#[tokio::test]
async fn trends_forward_period_metric_and_comparison() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RUN_PATH))
        .and(body_partial_json(json!({
            "input_value": "Analyze the comments trends for last 30 days and compare with the previous period",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response("Comments are up 12%.")))
        .expect(1)
        .mount(&server)
        .await;

    let app = common::build_test_app(common::unreachable_pool(), common::configured_insights(&server));
    let response = post_json(
        app,
        "/api/v1/insights/trends",
        json!({ "metric": "Comments", "period": "Last 30 days", "compare": true }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"]["query"],
        "Analyze the comments trends for last 30 days and compare with the previous period"
    );
    assert_eq!(json["data"]["message"], "Comments are up 12%.");
}

#[tokio::test]
async fn blank_answer_returns_502() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(RUN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_response(" \n ")))
        .mount(&server)
        .await;

    let app = common::build_test_app(common::unreachable_pool(), common::configured_insights(&server));
    let response = post_json(app, "/api/v1/insights/trends", json!({ "metric": "Likes", "period": "Last year" })).await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "EMPTY_RESPONSE");
}
