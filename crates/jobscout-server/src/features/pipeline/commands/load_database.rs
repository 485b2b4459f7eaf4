//! Load database command
//!
//! Loads the CSV written by the last scraper run into the `jobs` table.

use jobscout_ingest::CsvSink;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::ingest::{self, LoadError, LoadSummary};

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::SourceMissing(_) => AppError::BadRequest(err.to_string()),
            LoadError::Source(e) => AppError::Internal(e.to_string()),
            LoadError::Store(e) => AppError::from(e),
        }
    }
}

#[tracing::instrument(skip(pool, sink), fields(path = %sink.path().display()))]
pub async fn handle(pool: SqlitePool, sink: &CsvSink) -> Result<LoadSummary, LoadError> {
    ingest::load_from_sink(&pool, sink).await
}
