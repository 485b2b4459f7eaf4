//! jobscout server library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! HTTP API over the scraped job store.
//!
//! # Overview
//!
//! - **Jobs**: list/filter, get, create, update and delete stored jobs under `/api/jobs`
//! - **Pipeline**: trigger a scrape into the CSV file, load that file into the
//!   store, and report the state of both
//! - **Storage**: SQLite through SQLx, schema applied by embedded migrations
//!
//! Every response is a JSON envelope; see [`api::response`].
//!
//! # Architecture
//!
//! Features are vertical slices. Writes are commands, reads are queries, and
//! each has its own typed error that converts into [`AppError`] at the HTTP edge.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use jobscout_ingest::{CsvSink, Paginator};
//! use jobscout_server::{api, config::Config, db, features::FeatureState};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let state = FeatureState {
//!         db: pool,
//!         sink: CsvSink::new(&config.scraper.csv_path),
//!         paginator: Arc::new(Paginator::new(config.scraper.clone())?),
//!     };
//!     let app = api::create_router(state, &config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:5000").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod features;
pub mod ingest;
pub mod middleware;

pub use error::AppError;
