//! Pipeline status snapshot
//!
//! Never fails: an unreachable store shows up as `db_connected: false` with a
//! zero count.

use jobscout_ingest::CsvSink;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{self, jobs};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub csv_exists: bool,
    pub db_connected: bool,
    pub total_jobs: i64,
}

#[tracing::instrument(skip(pool, sink))]
pub async fn handle(pool: SqlitePool, sink: &CsvSink) -> StatsResponse {
    let csv_exists = sink.exists();

    if let Err(e) = db::health_check(&pool).await {
        tracing::warn!(error = %e, "Database unreachable while collecting stats");
        return StatsResponse {
            csv_exists,
            db_connected: false,
            total_jobs: 0,
        };
    }

    let total_jobs = jobs::count(&pool).await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to count jobs");
        0
    });

    StatsResponse {
        csv_exists,
        db_connected: true,
        total_jobs,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::db::connect_in_memory;
    use jobscout_common::JobRecord;

    #[tokio::test]
    async fn test_stats_counts_jobs() {
        let pool = connect_in_memory().await.unwrap();
        jobs::insert(&pool, &JobRecord::new("Engineer", "Acme", "Austin, TX"))
            .await
            .unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path().join("jobs.csv"));

        let stats = handle(pool, &sink).await;

        assert_eq!(
            stats,
            StatsResponse {
                csv_exists: false,
                db_connected: true,
                total_jobs: 1
            }
        );
    }

    #[tokio::test]
    async fn test_closed_pool_reports_disconnected() {
        let pool = connect_in_memory().await.unwrap();
        pool.close().await;
        let dir = tempfile::TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path().join("jobs.csv"));

        let stats = handle(pool, &sink).await;

        assert!(!stats.db_connected);
        assert_eq!(stats.total_jobs, 0);
    }
}
