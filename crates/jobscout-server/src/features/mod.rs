//! Feature modules implementing the jobscout API
//!
//! Each feature is a vertical slice with its own commands, queries and routes.
//!
//! # Features
//!
//! - **jobs**: CRUD over stored jobs, mounted at `/api/jobs`
//! - **pipeline**: scraper run, CSV load and stats, mounted at the root

pub mod jobs;
pub mod pipeline;

use axum::Router;
use jobscout_ingest::{CsvSink, Paginator};
use std::sync::Arc;

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    pub db: sqlx::SqlitePool,
    /// Search fetcher along with its HTTP client
    pub paginator: Arc<Paginator>,
    /// CSV interchange file written by the scraper and read by the loader
    pub sink: CsvSink,
}

/// Creates the router with every feature mounted
pub fn router(state: FeatureState) -> Router<()> {
    Router::new()
        .nest("/api/jobs", jobs::jobs_routes().with_state(state.db.clone()))
        .merge(pipeline::pipeline_routes().with_state(state))
}
