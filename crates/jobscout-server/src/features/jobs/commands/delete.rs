//! Delete job command

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteJobCommand {
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteJobResponse {
    pub id: i64,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DeleteJobError {
    #[error("Job {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<DeleteJobError> for AppError {
    fn from(err: DeleteJobError) -> Self {
        match err {
            DeleteJobError::NotFound(_) => AppError::NotFound(err.to_string()),
            DeleteJobError::Database(e) => AppError::Database(e),
        }
    }
}

/// Delete a job by id; an unknown id is an error, not a no-op
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: SqlitePool,
    command: DeleteJobCommand,
) -> Result<DeleteJobResponse, DeleteJobError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = ?1")
        .bind(command.id)
        .execute(&pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DeleteJobError::NotFound(command.id));
    }

    tracing::info!(job_id = command.id, "Job deleted");
    Ok(DeleteJobResponse {
        id: command.id,
        message: format!("Job {} deleted", command.id),
    })
}
