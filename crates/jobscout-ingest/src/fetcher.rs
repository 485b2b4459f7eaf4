//! Paginated search fetching
//!
//! [`Paginator`] walks search result pages one at a time: fetch, extract, then
//! decide whether to continue. Requests are strictly sequential because the
//! stop signal (a page with no listing containers) depends on the previous
//! page. A failed request never aborts the scrape; the page just counts as empty.

use jobscout_common::JobRecord;
use reqwest::header::{self, HeaderMap, HeaderValue};
use scraper::Html;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ScrapeConfig;
use crate::error::{IngestError, Result};
use crate::extractor::{Extractor, PageExtraction};
use crate::sink::CsvSink;

/// Pages fetched when the caller does not say otherwise.
pub const DEFAULT_MAX_PAGES: u32 = 5;

/// Upper bound on `max_pages` accepted from callers.
pub const MAX_PAGES_LIMIT: u32 = 100;

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

/// What to search for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub position: String,
    pub city: String,
    /// Recency code passed through as `fromage` (days since posting)
    #[serde(default)]
    pub date_posted: Option<String>,
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,
}

impl SearchQuery {
    pub fn new(position: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            city: city.into(),
            date_posted: None,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    pub fn with_date_posted(mut self, date_posted: impl Into<String>) -> Self {
        self.date_posted = Some(date_posted.into());
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.position.trim().is_empty() {
            return Err(IngestError::invalid_query("position is required"));
        }
        if self.city.trim().is_empty() {
            return Err(IngestError::invalid_query("city is required"));
        }
        if self.max_pages == 0 {
            return Err(IngestError::invalid_query("max_pages must be at least 1"));
        }
        if self.max_pages > MAX_PAGES_LIMIT {
            return Err(IngestError::invalid_query(format!(
                "max_pages must be at most {}",
                MAX_PAGES_LIMIT
            )));
        }
        Ok(())
    }

    fn recency(&self) -> Option<&str> {
        self.date_posted
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// Result of a scrape followed by a CSV write
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeReport {
    /// Whether the CSV write succeeded; false when nothing was scraped
    pub success: bool,
    pub count: usize,
    pub jobs: Vec<JobRecord>,
}

/// Sequential search results fetcher
#[derive(Debug, Clone)]
pub struct Paginator {
    client: reqwest::Client,
    config: ScrapeConfig,
    extractor: Extractor,
    search_url: Url,
}

impl Paginator {
    pub fn new(config: ScrapeConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(browser_headers())
            .build()?;

        Ok(Self {
            client,
            extractor: Extractor::new(config.base()?),
            search_url: config.search_url()?,
            config,
        })
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// URL of page `page` (zero-based) for `query`
    pub fn page_url(&self, query: &SearchQuery, page: u32) -> Url {
        let mut url = self.search_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("q", &query.position)
                .append_pair("l", &query.city)
                .append_pair("start", &self.offset(page).to_string());
            if let Some(recency) = query.recency() {
                pairs.append_pair("fromage", recency);
            }
        }
        url
    }

    /// Result offset of page `page`
    fn offset(&self, page: u32) -> u64 {
        u64::from(page) * u64::from(self.config.page_size)
    }

    /// Fetch up to `max_pages` pages and return every accepted record, in page order
    ///
    /// Only an invalid query is an error; transport failures degrade to empty pages.
    #[tracing::instrument(skip(self, query), fields(position = %query.position, city = %query.city))]
    pub async fn scrape(&self, query: &SearchQuery) -> Result<Vec<JobRecord>> {
        query.validate()?;

        let mut jobs = Vec::new();
        for page in 0..query.max_pages {
            if page > 0 {
                tokio::time::sleep(self.config.page_delay()).await;
            }

            let url = self.page_url(query, page);
            let extraction = match self.fetch_page(&url).await {
                Some(body) => {
                    let document = Html::parse_document(&body);
                    self.extractor.extract_page(&document)
                },
                None => PageExtraction::default(),
            };

            info!(
                page,
                containers = extraction.containers,
                accepted = extraction.records.len(),
                "Processed search page"
            );

            let exhausted = extraction.is_exhausted();
            jobs.extend(extraction.records);
            if exhausted {
                debug!(page, "No listing containers, stopping");
                break;
            }
        }

        info!(count = jobs.len(), "Scrape finished");
        Ok(jobs)
    }

    /// Scrape, then write the records through `sink`
    pub async fn run(&self, query: &SearchQuery, sink: &CsvSink) -> Result<ScrapeReport> {
        let jobs = self.scrape(query).await?;

        let success = match sink.write_async(jobs.clone()).await {
            Ok(()) => true,
            Err(IngestError::EmptyBatch) => {
                warn!("No jobs scraped, CSV not written");
                false
            },
            Err(e) => {
                warn!(error = %e, path = %sink.path().display(), "Failed to write CSV");
                false
            },
        };

        Ok(ScrapeReport {
            success,
            count: jobs.len(),
            jobs,
        })
    }

    async fn fetch_page(&self, url: &Url) -> Option<String> {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %url, error = %e, "Search request failed");
                return None;
            },
        };

        let status = response.status();
        if !status.is_success() {
            warn!(url = %url, status = %status, "Search request returned error status");
            return None;
        }

        match response.text().await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(url = %url, error = %e, "Failed to read search response body");
                None
            },
        }
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(header::ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}
