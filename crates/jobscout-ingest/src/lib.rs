//! jobscout ingest library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Scrapes job search result pages into [`JobRecord`](jobscout_common::JobRecord)s
//! and writes them to a CSV file for the loader.
//!
//! # Pipeline
//!
//! - [`fetcher::Paginator`] requests result pages sequentially and stops at the
//!   first page without listing containers
//! - [`extractor::Extractor`] resolves each field of a card through an ordered
//!   fallback chain of selectors
//! - [`sink::CsvSink`] writes and reads the interchange file
//!
//! # Example
//!
//! ```no_run
//! use jobscout_ingest::{CsvSink, Paginator, ScrapeConfig, SearchQuery};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ScrapeConfig::default();
//!     let sink = CsvSink::new(&config.csv_path);
//!     let paginator = Paginator::new(config)?;
//!
//!     let query = SearchQuery::new("Software Engineer", "Austin").with_max_pages(2);
//!     let report = paginator.run(&query, &sink).await?;
//!     println!("{} jobs, saved: {}", report.count, report.success);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod sink;

pub use config::ScrapeConfig;
pub use error::{IngestError, Result};
pub use extractor::Extractor;
pub use fetcher::{Paginator, ScrapeReport, SearchQuery};
pub use sink::CsvSink;
