//! Integration tests for the scrape / load / stats endpoints and `/health`
//!
//! The scraper talks to a wiremock search site; the CSV file lives in a
//! per-test temporary directory.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::http::StatusCode;
use jobscout_common::JobRecord;
use serde_json::json;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, ResponseTemplate,
};

mod helpers;
use helpers::{card, results_page, TestApp};

async fn mount_results(app: &TestApp, cards: &[String]) {
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("start", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string(results_page(cards)))
        .mount(&app.search_site)
        .await;
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let (status, json) = app.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["database"], "connected");
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let app = TestApp::new().await;
    app.pool.close().await;

    let (status, json) = app.get("/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["success"], false);
    assert!(json["error"]["message"].as_str().unwrap().contains("DATABASE_URL"));
}

#[tokio::test]
async fn test_stats_on_fresh_app() {
    let app = TestApp::new().await;

    let (status, json) = app.get("/stats").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json["data"],
        json!({"csv_exists": false, "db_connected": true, "total_jobs": 0})
    );
}

#[tokio::test]
async fn test_run_scraper_writes_csv() {
    let app = TestApp::new().await;
    mount_results(
        &app,
        &[card("Engineer", "Acme", "Austin, TX"), card("Analyst", "Globex", "Austin, TX")],
    )
    .await;

    let (status, json) = app
        .post(
            "/run-scraper",
            json!({"position": "Software Engineer", "city": "Austin", "max_pages": 1}),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["success"], true);
    assert_eq!(json["data"]["count"], 2);
    assert_eq!(json["data"]["jobs"][0]["company"], "Acme");
    assert_eq!(app.sink.read().unwrap().len(), 2);

    let (_, stats) = app.get("/stats").await;
    assert_eq!(stats["data"]["csv_exists"], true);
}

#[tokio::test]
async fn test_run_scraper_without_results() {
    let app = TestApp::new().await;
    mount_results(&app, &[]).await;

    let (status, json) = app
        .post("/run-scraper", json!({"position": "Engineer", "city": "Nowhere"}))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["success"], false);
    assert_eq!(json["data"]["count"], 0);
    assert!(!app.sink.exists());
}

#[tokio::test]
async fn test_run_scraper_requires_city() {
    let app = TestApp::new().await;

    let (status, json) = app.post("/run-scraper", json!({"position": "Engineer"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"]["code"], "BAD_REQUEST");
    assert!(app.search_site.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_load_database_without_csv() {
    let app = TestApp::new().await;

    let (status, json) = app.post("/load-database", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Please run the scraper first"));
}

#[tokio::test]
async fn test_load_database_twice_counts_duplicates() {
    let app = TestApp::new().await;
    app.sink
        .write(&[JobRecord::new("Engineer", "Acme", "Austin, TX")])
        .unwrap();

    let (status, first) = app.post("/load-database", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"], json!({"inserted": 1, "duplicates": 0, "total": 1}));

    let (_, second) = app.post("/load-database", json!({})).await;
    assert_eq!(second["data"], json!({"inserted": 0, "duplicates": 1, "total": 1}));
}

#[tokio::test]
async fn test_load_database_with_unreachable_store() {
    let app = TestApp::new().await;
    app.sink
        .write(&[JobRecord::new("Engineer", "Acme", "Austin, TX")])
        .unwrap();
    app.pool.close().await;

    let (status, json) = app.post("/load-database", json!({})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
    assert!(json["error"]["message"].as_str().unwrap().contains("DATABASE_URL"));
}

#[tokio::test]
async fn test_scrape_then_load_then_list() {
    let app = TestApp::new().await;
    mount_results(
        &app,
        &[card("Engineer", "Acme", "Austin, TX"), card("Engineer", "Acme", "Dallas, TX")],
    )
    .await;

    app.post(
        "/run-scraper",
        json!({"position": "Engineer", "city": "Texas", "max_pages": 1}),
    )
    .await;
    let (_, load) = app.post("/load-database", json!({})).await;
    assert_eq!(load["data"]["inserted"], 2);

    let (_, list) = app.get("/api/jobs?city=dallas").await;
    assert_eq!(list["meta"]["count"], 1);

    let (_, stats) = app.get("/stats").await;
    assert_eq!(stats["data"]["total_jobs"], 2);
}
