//! Error types for scraping and CSV interchange

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ingest operations
pub type Result<T> = std::result::Result<T, IngestError>;

#[derive(Error, Debug)]
pub enum IngestError {
    /// Search parameters failed validation before any request was made
    #[error("Invalid search: {0}")]
    InvalidQuery(String),

    /// Scraper settings are unusable (bad base URL, zero timeout, ...)
    #[error("Scraper configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Nothing to write; distinct from a successful write
    #[error("No jobs to save")]
    EmptyBatch,

    /// The CSV file a load depends on does not exist
    #[error("CSV file not found: '{}'. Run the scraper first.", .0.display())]
    SourceMissing(PathBuf),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A blocking file task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IngestError {
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::InvalidQuery(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
