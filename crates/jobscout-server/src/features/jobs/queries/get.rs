use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::jobs::{self, StoredJob};
use crate::error::AppError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetJobQuery {
    pub id: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum GetJobError {
    #[error("Job {0} not found")]
    NotFound(i64),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<GetJobError> for AppError {
    fn from(err: GetJobError) -> Self {
        match err {
            GetJobError::NotFound(_) => AppError::NotFound(err.to_string()),
            GetJobError::Database(e) => AppError::Database(e),
        }
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, query: GetJobQuery) -> Result<StoredJob, GetJobError> {
    jobs::find(&pool, query.id)
        .await?
        .ok_or(GetJobError::NotFound(query.id))
}
