//! Create job command
//!
//! Adds a single job by hand. `title` and `company` are required; every other
//! field falls back to the `N/A` sentinel when omitted.

use jobscout_common::{JobKey, JobRecord, UNKNOWN};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{self, jobs, jobs::StoredJob};
use crate::error::AppError;

/// Command to create a new job
///
/// # Examples
///
/// ```rust,ignore
/// use jobscout_server::features::jobs::commands::CreateJobCommand;
///
/// let command = CreateJobCommand {
///     title: Some("Backend Engineer".to_string()),
///     company: Some("Acme".to_string()),
///     location: Some("Austin, TX".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateJobCommand {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub salary: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub posted_date: Option<String>,
    #[serde(default)]
    pub job_url: Option<String>,
}

/// Errors that can occur when creating a job
#[derive(Debug, thiserror::Error)]
pub enum CreateJobError {
    #[error("Title is required")]
    TitleRequired,

    #[error("Company is required")]
    CompanyRequired,

    #[error("Job already exists: {0}")]
    Duplicate(JobKey),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<CreateJobError> for AppError {
    fn from(err: CreateJobError) -> Self {
        match err {
            CreateJobError::TitleRequired | CreateJobError::CompanyRequired => {
                AppError::BadRequest(err.to_string())
            },
            CreateJobError::Duplicate(_) => AppError::Conflict(err.to_string()),
            CreateJobError::Database(e) => AppError::Database(e),
        }
    }
}

fn present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

impl CreateJobCommand {
    /// Validates the command parameters
    ///
    /// # Errors
    ///
    /// - `TitleRequired` - Title missing or blank
    /// - `CompanyRequired` - Company missing or blank
    pub fn validate(&self) -> Result<(), CreateJobError> {
        if !present(&self.title) {
            return Err(CreateJobError::TitleRequired);
        }
        if !present(&self.company) {
            return Err(CreateJobError::CompanyRequired);
        }
        Ok(())
    }

    /// The record to store; omitted fields become the sentinel
    pub fn into_record(self) -> JobRecord {
        let or_unknown = |value: Option<String>| value.unwrap_or_else(|| UNKNOWN.to_string());
        JobRecord {
            title: or_unknown(self.title),
            company: or_unknown(self.company),
            location: or_unknown(self.location),
            salary: or_unknown(self.salary),
            job_type: or_unknown(self.job_type),
            description: or_unknown(self.description),
            posted_date: or_unknown(self.posted_date),
            job_url: or_unknown(self.job_url),
        }
    }
}

#[tracing::instrument(skip(pool, command), fields(title = ?command.title, company = ?command.company))]
pub async fn handle(pool: SqlitePool, command: CreateJobCommand) -> Result<StoredJob, CreateJobError> {
    command.validate()?;

    let record = command.into_record();
    let job = jobs::insert(&pool, &record).await.map_err(|e| {
        if db::is_unique_violation(&e) {
            CreateJobError::Duplicate(record.key())
        } else {
            CreateJobError::Database(e)
        }
    })?;

    tracing::info!(job_id = job.id, "Job created");
    Ok(job)
}
