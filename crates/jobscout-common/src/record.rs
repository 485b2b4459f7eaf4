//! Job record model
//!
//! A [`JobRecord`] is created in memory by the extractor, serialized to CSV by
//! the sink and finally persisted by the loader. Every field is a plain string:
//! unresolved values carry the [`UNKNOWN`] sentinel instead of being absent.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel stored in any field that could not be resolved.
///
/// Callers must read it as "no data", never as a real value.
pub const UNKNOWN: &str = "N/A";

/// Column order of the tabular interchange file.
pub const CSV_COLUMNS: [&str; 8] = [
    "title",
    "company",
    "location",
    "salary",
    "job_type",
    "description",
    "posted_date",
    "job_url",
];

/// Maximum length of a description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// One scraped (or stored) job listing
///
/// Field order matches [`CSV_COLUMNS`]; the CSV writer relies on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default = "unknown")]
    pub title: String,
    #[serde(default = "unknown")]
    pub company: String,
    #[serde(default = "unknown")]
    pub location: String,
    #[serde(default = "unknown")]
    pub salary: String,
    #[serde(default = "unknown")]
    pub job_type: String,
    #[serde(default = "unknown")]
    pub description: String,
    #[serde(default = "unknown")]
    pub posted_date: String,
    #[serde(default = "unknown")]
    pub job_url: String,
}

impl Default for JobRecord {
    fn default() -> Self {
        Self::untitled()
    }
}

impl JobRecord {
    /// A record with every field set to [`UNKNOWN`].
    pub fn untitled() -> Self {
        Self {
            title: unknown(),
            company: unknown(),
            location: unknown(),
            salary: unknown(),
            job_type: unknown(),
            description: unknown(),
            posted_date: unknown(),
            job_url: unknown(),
        }
    }

    /// Start a record from its identity triple; every other field is [`UNKNOWN`].
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            location: location.into(),
            ..Self::untitled()
        }
    }

    /// Whether the title resolved to something other than the sentinel.
    pub fn has_title(&self) -> bool {
        self.title != UNKNOWN
    }

    /// The deduplication key of this record.
    pub fn key(&self) -> JobKey {
        JobKey {
            title: self.title.clone(),
            company: self.company.clone(),
            location: self.location.clone(),
        }
    }

    /// Set the description, truncated to [`MAX_DESCRIPTION_CHARS`] characters.
    pub fn set_description(&mut self, text: &str) {
        self.description = text.chars().take(MAX_DESCRIPTION_CHARS).collect();
    }
}

/// Identity of a job: (title, company, location)
///
/// Two records with the same key are the same job, whatever their other fields say.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobKey {
    pub title: String,
    pub company: String,
    pub location: String,
}

impl fmt::Display for JobKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {} ({})", self.title, self.company, self.location)
    }
}

/// Employment type derived from a listing's metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Remote,
    #[default]
    #[serde(rename = "N/A")]
    Unknown,
}

impl JobType {
    /// Keywords checked in order; the first hit decides the type.
    const KEYWORDS: [(&'static str, JobType); 4] = [
        ("full-time", JobType::FullTime),
        ("part-time", JobType::PartTime),
        ("contract", JobType::Contract),
        ("remote", JobType::Remote),
    ];

    /// Classify a free-text metadata blob.
    ///
    /// Matching is case-insensitive and never combines types: "Full-time, Remote"
    /// is `FullTime`.
    pub fn from_metadata(text: &str) -> Self {
        let lowered = text.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| lowered.contains(keyword))
            .map(|(_, job_type)| *job_type)
            .unwrap_or(JobType::Unknown)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
            JobType::Remote => "Remote",
            JobType::Unknown => UNKNOWN,
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
