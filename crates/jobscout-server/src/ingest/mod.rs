//! Server-side ingestion: moving scraped CSV data into the store
//!
//! Scraping itself lives in the `jobscout-ingest` crate; this module owns the
//! part that needs the database.

pub mod loader;

pub use loader::{load, load_from_sink, LoadError, LoadSummary};
