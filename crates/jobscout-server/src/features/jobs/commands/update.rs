//! Update job command
//!
//! Partially updates an existing job. Only the fields present in the request
//! change. `id` and `scraped_at` are not part of the request and never change.
//! An explicit empty string is stored as given; it is not treated as "omitted".
//! The merge happens inside one UPDATE, so concurrent updates of different
//! fields of the same job never undo each other.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{self, jobs, jobs::StoredJob};
use crate::error::AppError;

/// Command to update an existing job
///
/// `id` comes from the request path, not the body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateJobCommand {
    #[serde(skip)]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_url: Option<String>,
}

/// Errors that can occur when updating a job
#[derive(Debug, thiserror::Error)]
pub enum UpdateJobError {
    /// No recognized fields were provided for update
    #[error("No valid fields to update")]
    NoFieldsToUpdate,

    #[error("Job {0} not found")]
    NotFound(i64),

    /// The change would give this job the key of another stored job
    #[error("Job {0} would have the same title, company and location as another job")]
    Duplicate(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<UpdateJobError> for AppError {
    fn from(err: UpdateJobError) -> Self {
        match err {
            UpdateJobError::NoFieldsToUpdate => AppError::BadRequest(err.to_string()),
            UpdateJobError::NotFound(_) => AppError::NotFound(err.to_string()),
            UpdateJobError::Duplicate(_) => AppError::Conflict(err.to_string()),
            UpdateJobError::Database(e) => AppError::Database(e),
        }
    }
}

impl UpdateJobCommand {
    pub fn validate(&self) -> Result<(), UpdateJobError> {
        let any = [
            &self.title,
            &self.company,
            &self.location,
            &self.salary,
            &self.job_type,
            &self.description,
            &self.posted_date,
            &self.job_url,
        ]
        .iter()
        .any(|field| field.is_some());

        if !any {
            return Err(UpdateJobError::NoFieldsToUpdate);
        }
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(job_id = command.id))]
pub async fn handle(pool: SqlitePool, command: UpdateJobCommand) -> Result<StoredJob, UpdateJobError> {
    command.validate()?;

    let id = command.id;
    let sql = format!(
        r#"
        UPDATE jobs
        SET title = COALESCE(?1, title),
            company = COALESCE(?2, company),
            location = COALESCE(?3, location),
            salary = COALESCE(?4, salary),
            job_type = COALESCE(?5, job_type),
            description = COALESCE(?6, description),
            posted_date = COALESCE(?7, posted_date),
            job_url = COALESCE(?8, job_url),
            title_folded = COALESCE(?10, title_folded),
            location_folded = COALESCE(?11, location_folded)
        WHERE id = ?9
        RETURNING {}
        "#,
        jobs::COLUMNS
    );

    let updated = sqlx::query_as::<_, StoredJob>(&sql)
        .bind(command.title.as_deref())
        .bind(command.company.as_deref())
        .bind(command.location.as_deref())
        .bind(command.salary.as_deref())
        .bind(command.job_type.as_deref())
        .bind(command.description.as_deref())
        .bind(command.posted_date.as_deref())
        .bind(command.job_url.as_deref())
        .bind(id)
        .bind(command.title.as_deref().map(jobs::fold))
        .bind(command.location.as_deref().map(jobs::fold))
        .fetch_optional(&pool)
        .await
        .map_err(|e| {
            if db::is_unique_violation(&e) {
                UpdateJobError::Duplicate(id)
            } else {
                UpdateJobError::Database(e)
            }
        })?
        .ok_or(UpdateJobError::NotFound(id))?;

    tracing::info!(job_id = id, "Job updated");
    Ok(updated)
}
