//! Integration tests for the `/api/v1/engagement` endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, get, post_json};
use serde_json::json;
use sociallens_api::seed;
use sqlx::PgPool;

fn app(pool: PgPool) -> axum::Router {
    common::build_test_app(pool, common::unconfigured_insights())
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn seed_replaces_existing_records(pool: PgPool) {
    let response = post_json(
        app(pool.clone()),
        "/api/v1/engagement/seed",
        json!({ "count": 25, "seed": 7 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["deleted"], 0);
    assert_eq!(json["data"]["inserted"], 25);

    let response = post_json(
        app(pool.clone()),
        "/api/v1/engagement/seed",
        json!({ "count": 10 }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["deleted"], 25);
    assert_eq!(json["data"]["inserted"], 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn seed_can_append(pool: PgPool) {
    seed::reseed(&pool, 5, Some(1), true).await.unwrap();

    let response = post_json(
        app(pool.clone()),
        "/api/v1/engagement/seed",
        json!({ "count": 5, "replace": false }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["deleted"], 0);

    let json = body_json(get(app(pool), "/api/v1/engagement").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 10);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn seed_rejects_out_of_range_counts(pool: PgPool) {
    for count in [0, 5_001] {
        let response = post_json(
            app(pool.clone()),
            "/api/v1/engagement/seed",
            json!({ "count": count }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["code"], "BAD_REQUEST");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn seed_if_empty_only_fills_an_empty_store(pool: PgPool) {
    assert_eq!(seed::seed_if_empty(&pool, 12).await.unwrap(), 12);
    assert_eq!(seed::seed_if_empty(&pool, 12).await.unwrap(), 0);
}

// ---------------------------------------------------------------------------
// Listing and summary
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_returns_newest_first_and_honours_limit(pool: PgPool) {
    seed::reseed(&pool, 30, Some(42), true).await.unwrap();

    let json = body_json(get(app(pool), "/api/v1/engagement?limit=5").await).await;
    let records = json["data"].as_array().unwrap();
    assert_eq!(records.len(), 5);

    let posted: Vec<chrono::DateTime<chrono::Utc>> = records
        .iter()
        .map(|r| r["posted_at"].as_str().unwrap().parse().unwrap())
        .collect();
    let mut sorted = posted.clone();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    assert_eq!(posted, sorted);
    assert!(records[0]["impressions"].as_i64().unwrap() > 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_covers_every_stored_record(pool: PgPool) {
    seed::reseed(&pool, 60, Some(3), true).await.unwrap();

    let response = get(app(pool), "/api/v1/engagement/summary").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json["data"].as_array().unwrap();
    assert!(!rows.is_empty());
    let total: i64 = rows.iter().map(|r| r["posts"].as_i64().unwrap()).sum();
    assert_eq!(total, 60);
    for row in rows {
        assert!(["Images", "Videos", "Carousels"].contains(&row["post_type"].as_str().unwrap()));
        assert!(row["engagement_rate"].as_f64().unwrap() > 0.0);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_of_empty_store_is_empty(pool: PgPool) {
    let json = body_json(get(app(pool), "/api/v1/engagement/summary").await).await;
    assert_eq!(json["data"], json!([]));
}

// ---------------------------------------------------------------------------
// Store-backed metrics fallback
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn performance_uses_store_summary_when_answer_has_no_numbers(pool: PgPool) {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    seed::reseed(&pool, 40, Some(9), true).await.unwrap();

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(common::RUN_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(common::chat_response("Carousels lead.")),
        )
        .mount(&server)
        .await;

    let app = common::build_test_app(pool, common::configured_insights(&server));
    let json = body_json(post_json(app, "/api/v1/insights/performance", json!({})).await).await;

    assert_eq!(json["data"]["metrics"]["source"], "store");
    assert_ne!(json["data"]["kpis"][3]["value"], "n/a");
}
