//! Run scraper command
//!
//! Scrapes the requested search and replaces the CSV interchange file with the
//! result. Missing `position`/`city` are rejected before any request goes out.

use jobscout_ingest::{CsvSink, IngestError, Paginator, ScrapeReport, SearchQuery};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunScraperCommand {
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub city: String,
    /// Recency code in days; blank means any date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_posted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_pages: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum RunScraperError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Scrape failed: {0}")]
    Scrape(IngestError),
}

impl From<IngestError> for RunScraperError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::InvalidQuery(message) => RunScraperError::InvalidInput(message),
            other => RunScraperError::Scrape(other),
        }
    }
}

impl From<RunScraperError> for AppError {
    fn from(err: RunScraperError) -> Self {
        match err {
            RunScraperError::InvalidInput(message) => AppError::BadRequest(message),
            RunScraperError::Scrape(e) => AppError::Internal(e.to_string()),
        }
    }
}

impl RunScraperCommand {
    pub fn into_query(self) -> SearchQuery {
        let mut query = SearchQuery::new(self.position.trim(), self.city.trim());
        if let Some(date_posted) = self.date_posted {
            query = query.with_date_posted(date_posted);
        }
        if let Some(max_pages) = self.max_pages {
            query = query.with_max_pages(max_pages);
        }
        query
    }
}

#[tracing::instrument(skip(paginator, sink, command), fields(position = %command.position, city = %command.city))]
pub async fn handle(
    paginator: &Paginator,
    sink: &CsvSink,
    command: RunScraperCommand,
) -> Result<ScrapeReport, RunScraperError> {
    let query = command.into_query();
    query.validate()?;

    let report = paginator.run(&query, sink).await?;

    tracing::info!(count = report.count, success = report.success, "Scraper run finished");
    Ok(report)
}
