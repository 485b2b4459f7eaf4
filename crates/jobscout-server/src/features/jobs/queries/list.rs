//! List jobs query
//!
//! Both filters are case-insensitive substring matches and combine with AND.
//! Blank filters are ignored, so an empty query lists every job. Matching runs
//! against the folded shadow columns, so non-ASCII text compares the same way
//! as ASCII.

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::jobs::{self, StoredJob};
use crate::error::AppError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListJobsQuery {
    /// Substring of `location`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    /// Substring of `title`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ListJobsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ListJobsError> for AppError {
    fn from(err: ListJobsError) -> Self {
        match err {
            ListJobsError::Database(e) => AppError::Database(e),
        }
    }
}

/// `%needle%` for LIKE, folded like the shadow columns, with LIKE wildcards escaped
fn like_pattern(filter: Option<&str>) -> Option<String> {
    let needle = filter.map(str::trim).filter(|f| !f.is_empty())?;
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in jobs::fold(needle).chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    Some(pattern)
}

#[tracing::instrument(skip(pool))]
pub async fn handle(pool: SqlitePool, query: ListJobsQuery) -> Result<Vec<StoredJob>, ListJobsError> {
    let sql = format!(
        r#"
        SELECT {}
        FROM jobs
        WHERE (?1 IS NULL OR location_folded LIKE ?1 ESCAPE '\')
          AND (?2 IS NULL OR title_folded LIKE ?2 ESCAPE '\')
        ORDER BY id
        "#,
        jobs::COLUMNS
    );

    let items = sqlx::query_as::<_, StoredJob>(&sql)
        .bind(like_pattern(query.city.as_deref()))
        .bind(like_pattern(query.position.as_deref()))
        .fetch_all(&pool)
        .await?;

    tracing::debug!(count = items.len(), "Jobs listed");
    Ok(items)
}
