//! Scrape-then-load pipeline operations
//!
//! Thin HTTP wrappers around the `jobscout-ingest` paginator and the
//! server-side loader, plus a status snapshot of both halves.

pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{RunScraperCommand, RunScraperError};
pub use queries::StatsResponse;
pub use routes::pipeline_routes;
