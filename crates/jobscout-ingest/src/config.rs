//! Scraper configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

use crate::error::{IngestError, Result};

// ============================================================================
// Scraper Configuration Constants
// ============================================================================

/// Origin of the job search site.
pub const DEFAULT_BASE_URL: &str = "https://www.indeed.com";

/// Path of the search results page, relative to the base URL.
pub const DEFAULT_SEARCH_PATH: &str = "/jobs";

/// Per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Pause between two page requests, in milliseconds.
pub const DEFAULT_PAGE_DELAY_MS: u64 = 2000;

/// Result offset step between pages.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Where scraped jobs are written.
pub const DEFAULT_CSV_PATH: &str = "indeed_jobs.csv";

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Settings shared by the fetcher, the extractor and the CSV sink
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Site origin; relative job links are resolved against it
    pub base_url: String,
    pub search_path: String,
    pub timeout_secs: u64,
    pub page_delay_ms: u64,
    pub page_size: u32,
    pub user_agent: String,
    pub csv_path: PathBuf,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            search_path: DEFAULT_SEARCH_PATH.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_delay_ms: DEFAULT_PAGE_DELAY_MS,
            page_size: DEFAULT_PAGE_SIZE,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            csv_path: PathBuf::from(DEFAULT_CSV_PATH),
        }
    }
}

impl ScrapeConfig {
    /// Load from `SCRAPER_*` environment variables, falling back to defaults
    ///
    /// - `SCRAPER_BASE_URL`
    /// - `SCRAPER_SEARCH_PATH`
    /// - `SCRAPER_TIMEOUT_SECS`
    /// - `SCRAPER_PAGE_DELAY_MS`
    /// - `SCRAPER_USER_AGENT`
    /// - `SCRAPER_CSV_PATH`
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            base_url: std::env::var("SCRAPER_BASE_URL").unwrap_or(defaults.base_url),
            search_path: std::env::var("SCRAPER_SEARCH_PATH").unwrap_or(defaults.search_path),
            timeout_secs: std::env::var("SCRAPER_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
            page_delay_ms: std::env::var("SCRAPER_PAGE_DELAY_MS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.page_delay_ms),
            page_size: defaults.page_size,
            user_agent: std::env::var("SCRAPER_USER_AGENT").unwrap_or(defaults.user_agent),
            csv_path: std::env::var("SCRAPER_CSV_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.csv_path),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_page_delay_ms(mut self, page_delay_ms: u64) -> Self {
        self.page_delay_ms = page_delay_ms;
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_csv_path(mut self, csv_path: impl Into<PathBuf>) -> Self {
        self.csv_path = csv_path.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let base = self.base()?;
        if base.cannot_be_a_base() {
            return Err(IngestError::config(format!(
                "Base URL '{}' cannot have paths joined to it",
                self.base_url
            )));
        }
        if self.timeout_secs == 0 {
            return Err(IngestError::config("Timeout must be greater than 0"));
        }
        if self.page_size == 0 {
            return Err(IngestError::config("Page size must be greater than 0"));
        }
        if self.csv_path.as_os_str().is_empty() {
            return Err(IngestError::config("CSV path cannot be empty"));
        }
        Ok(())
    }

    /// Parsed base URL
    pub fn base(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// URL of the search results page, without query parameters
    pub fn search_url(&self) -> Result<Url> {
        Ok(self.base()?.join(&self.search_path)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }
}
