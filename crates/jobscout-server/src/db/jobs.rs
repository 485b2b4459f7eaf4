//! Row mapping and shared statements for the `jobs` table

use chrono::NaiveDateTime;
use jobscout_common::JobRecord;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, Sqlite, SqlitePool};

/// Column list used by every statement that returns whole rows
pub const COLUMNS: &str =
    "id, title, company, location, salary, job_type, description, posted_date, job_url, scraped_at";

/// Case folding used for the searchable shadow columns and their filters
pub fn fold(text: &str) -> String {
    text.to_lowercase()
}

/// A persisted job: the scraped record plus its store-assigned identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredJob {
    pub id: i64,
    #[serde(flatten)]
    pub record: JobRecord,
    pub scraped_at: NaiveDateTime,
}

impl<'r> FromRow<'r, SqliteRow> for StoredJob {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            record: JobRecord {
                title: row.try_get("title")?,
                company: row.try_get("company")?,
                location: row.try_get("location")?,
                salary: row.try_get("salary")?,
                job_type: row.try_get("job_type")?,
                description: row.try_get("description")?,
                posted_date: row.try_get("posted_date")?,
                job_url: row.try_get("job_url")?,
            },
            scraped_at: row.try_get("scraped_at")?,
        })
    }
}

/// Insert one record and return the stored row
///
/// Fails with a UNIQUE violation when the (title, company, location) key exists.
pub async fn insert<'e, E>(executor: E, record: &JobRecord) -> Result<StoredJob, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let sql = format!(
        r#"
        INSERT INTO jobs (title, company, location, salary, job_type, description, posted_date, job_url,
                          title_folded, location_folded)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
        RETURNING {}
        "#,
        COLUMNS
    );

    sqlx::query_as::<_, StoredJob>(&sql)
        .bind(&record.title)
        .bind(&record.company)
        .bind(&record.location)
        .bind(&record.salary)
        .bind(&record.job_type)
        .bind(&record.description)
        .bind(&record.posted_date)
        .bind(&record.job_url)
        .bind(fold(&record.title))
        .bind(fold(&record.location))
        .fetch_one(executor)
        .await
}

pub async fn find<'e, E>(executor: E, id: i64) -> Result<Option<StoredJob>, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let sql = format!("SELECT {} FROM jobs WHERE id = ?1", COLUMNS);
    sqlx::query_as::<_, StoredJob>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// Fill the shadow columns of rows stored before they existed
///
/// Returns the number of rows folded.
pub async fn fold_pending(pool: &SqlitePool) -> Result<usize, sqlx::Error> {
    let pending: Vec<(i64, String, String)> = sqlx::query_as(
        r#"
        SELECT id, title, location
        FROM jobs
        WHERE (title_folded = '' AND title <> '')
           OR (location_folded = '' AND location <> '')
        "#,
    )
    .fetch_all(pool)
    .await?;

    if pending.is_empty() {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    for (id, title, location) in &pending {
        sqlx::query("UPDATE jobs SET title_folded = ?1, location_folded = ?2 WHERE id = ?3")
            .bind(fold(title))
            .bind(fold(location))
            .bind(id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    tracing::info!(rows = pending.len(), "Folded search columns of existing jobs");
    Ok(pending.len())
}

/// Total number of stored jobs
pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
        .fetch_one(executor)
        .await
}
