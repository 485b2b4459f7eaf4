//! Test helpers for jobscout server integration tests
//!
//! Every [`TestApp`] gets its own in-memory database, a temporary directory for
//! the CSV file and a mock search site for the scraper.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use jobscout_common::JobRecord;
use jobscout_ingest::{CsvSink, Paginator, ScrapeConfig};
use jobscout_server::{api, config::Config, db, db::jobs::StoredJob, features::FeatureState};
use serde_json::Value;
use sqlx::SqlitePool;
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::MockServer;

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
    pub sink: CsvSink,
    pub search_site: MockServer,
    _dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let pool = db::connect_in_memory().await.expect("in-memory database");
        let dir = TempDir::new().expect("temp dir");
        let search_site = MockServer::start().await;

        let mut config = Config::default();
        config.scraper = ScrapeConfig::default()
            .with_base_url(search_site.uri())
            .with_page_delay_ms(0)
            .with_timeout_secs(5)
            .with_csv_path(dir.path().join("indeed_jobs.csv"));

        let sink = CsvSink::new(&config.scraper.csv_path);
        let state = FeatureState {
            db: pool.clone(),
            sink: sink.clone(),
            paginator: Arc::new(Paginator::new(config.scraper.clone()).expect("paginator")),
        };

        Self {
            router: api::create_router(state, &config),
            pool,
            sink,
            search_site,
            _dir: dir,
        }
    }

    pub async fn seed(&self, title: &str, company: &str, location: &str) -> StoredJob {
        db::jobs::insert(&self.pool, &JobRecord::new(title, company, location))
            .await
            .expect("seed job")
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None).await
    }

    pub async fn send_raw(&self, method: Method, uri: &str, body: &'static str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .expect("request");
        self.call(request).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");
        self.call(request).await
    }

    async fn call(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router response");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, json)
    }
}

/// One listing card as the search site renders it
pub fn card(title: &str, company: &str, location: &str) -> String {
    format!(
        r#"<div class="job_seen_beacon">
             <h2 class="jobTitle"><a href="/rc/clk?jk={title}">{title}</a></h2>
             <span class="companyName">{company}</span>
             <div class="companyLocation">{location}</div>
           </div>"#
    )
}

pub fn results_page(cards: &[String]) -> String {
    format!("<html><body>{}</body></html>", cards.join("\n"))
}
