//! Deduplicating load of scraped records into the `jobs` table
//!
//! Deduplication is enforced by the schema's UNIQUE (title, company, location)
//! constraint, so records already stored by earlier runs are caught as well as
//! repeats within one batch. The whole batch runs in a single transaction: a
//! duplicate only skips its row, any other failure rolls everything back.

use jobscout_common::JobRecord;
use jobscout_ingest::{CsvSink, IngestError};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

use crate::db::{self, jobs, DbError};

/// Outcome of one load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Rows added by this load
    pub inserted: usize,
    /// Records skipped because their key was already stored
    pub duplicates: usize,
    /// Rows in the store after the load
    pub total: i64,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("CSV file '{}' not found. Please run the scraper first.", .0.display())]
    SourceMissing(PathBuf),

    #[error("Failed to read scraped jobs: {0}")]
    Source(IngestError),

    #[error(transparent)]
    Store(#[from] DbError),
}

impl From<IngestError> for LoadError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::SourceMissing(path) => LoadError::SourceMissing(path),
            other => LoadError::Source(other),
        }
    }
}

impl From<sqlx::Error> for LoadError {
    fn from(err: sqlx::Error) -> Self {
        LoadError::Store(DbError::Sqlx(err))
    }
}

/// Insert `records`, counting key collisions as duplicates
#[tracing::instrument(skip(pool, records), fields(batch = records.len()))]
pub async fn load(pool: &SqlitePool, records: &[JobRecord]) -> Result<LoadSummary, LoadError> {
    db::run_migrations(pool).await?;

    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    let mut duplicates = 0;

    for record in records {
        match jobs::insert(&mut *tx, record).await {
            Ok(_) => inserted += 1,
            Err(e) if db::is_unique_violation(&e) => {
                debug!(key = %record.key(), "Skipping duplicate job");
                duplicates += 1;
            },
            Err(e) => return Err(e.into()),
        }
    }

    tx.commit().await?;

    let total = jobs::count(pool).await?;

    info!(inserted, duplicates, total, "Jobs loaded into database");
    Ok(LoadSummary {
        inserted,
        duplicates,
        total,
    })
}

/// Read the CSV written by the scraper and load it
pub async fn load_from_sink(pool: &SqlitePool, sink: &CsvSink) -> Result<LoadSummary, LoadError> {
    let records = sink.read_async().await?;
    load(pool, &records).await
}
