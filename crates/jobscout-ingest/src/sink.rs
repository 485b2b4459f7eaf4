//! CSV interchange file between the scraper and the loader

use jobscout_common::JobRecord;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

use crate::error::{IngestError, Result};

/// Flat file of [`JobRecord`]s, one row per job, with a header row
///
/// Columns follow [`jobscout_common::CSV_COLUMNS`].
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Replace the file with `records`
    ///
    /// Rows go to a temporary file in the same directory which is then renamed
    /// over the target, so a concurrent reader sees the old file or the new one,
    /// never a partial write. An empty batch leaves any existing file alone and
    /// returns [`IngestError::EmptyBatch`].
    pub fn write(&self, records: &[JobRecord]) -> Result<()> {
        if records.is_empty() {
            return Err(IngestError::EmptyBatch);
        }

        let dir = match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                std::fs::create_dir_all(parent)?;
                parent.to_path_buf()
            },
            None => PathBuf::from("."),
        };

        let temp = NamedTempFile::new_in(&dir)?;
        {
            let mut writer = csv::Writer::from_writer(temp.as_file());
            for record in records {
                writer.serialize(record)?;
            }
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| IngestError::Io(e.error))?;

        info!(path = %self.path.display(), count = records.len(), "Saved jobs to CSV");
        Ok(())
    }

    /// [`write`](Self::write) on the blocking thread pool
    pub async fn write_async(&self, records: Vec<JobRecord>) -> Result<()> {
        let sink = self.clone();
        tokio::task::spawn_blocking(move || sink.write(&records)).await?
    }

    /// [`read`](Self::read) on the blocking thread pool
    pub async fn read_async(&self) -> Result<Vec<JobRecord>> {
        let sink = self.clone();
        tokio::task::spawn_blocking(move || sink.read()).await?
    }

    /// Read every row back
    ///
    /// A missing file is [`IngestError::SourceMissing`], never an empty list.
    /// Columns absent from the file default to the sentinel.
    pub fn read(&self) -> Result<Vec<JobRecord>> {
        if !self.exists() {
            return Err(IngestError::SourceMissing(self.path.clone()));
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let records = reader
            .deserialize::<JobRecord>()
            .collect::<std::result::Result<Vec<_>, _>>()?;

        info!(path = %self.path.display(), count = records.len(), "Read jobs from CSV");
        Ok(records)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use jobscout_common::{CSV_COLUMNS, UNKNOWN};
    use tempfile::TempDir;

    fn sample(n: usize) -> Vec<JobRecord> {
        (0..n)
            .map(|i| {
                let mut record = JobRecord::new(
                    format!("Engineer {}", i),
                    "Acme, Inc.",
                    "Austin, TX",
                );
                record.salary = "$100,000 - $120,000".to_string();
                record.description = "Line one\nline \"two\"".to_string();
                record.job_url = format!("https://www.indeed.com/viewjob?jk={}", i);
                record
            })
            .collect()
    }

    #[test]
    fn test_empty_batch_is_failure() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path().join("jobs.csv"));

        assert!(matches!(sink.write(&[]), Err(IngestError::EmptyBatch)));
        assert!(!sink.exists());
    }

    #[test]
    fn test_write_then_read_returns_same_records() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path().join("jobs.csv"));
        let records = sample(3);

        sink.write(&records).unwrap();

        assert_eq!(sink.read().unwrap(), records);
    }

    #[test]
    fn test_header_row_and_column_order() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path().join("jobs.csv"));
        sink.write(&sample(2)).unwrap();

        let content = std::fs::read_to_string(sink.path()).unwrap();
        let header = content.lines().next().unwrap();
        assert_eq!(header, CSV_COLUMNS.join(","));

        let mut reader = csv::Reader::from_path(sink.path()).unwrap();
        assert_eq!(reader.records().count(), 2);
    }

    #[test]
    fn test_missing_file_is_distinct_error() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path().join("absent.csv"));

        match sink.read() {
            Err(IngestError::SourceMissing(path)) => assert_eq!(path, sink.path()),
            other => panic!("expected SourceMissing, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_columns_default_to_sentinel() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.csv");
        std::fs::write(&path, "title,company,location\nCook,Diner,Waco\n").unwrap();

        let records = CsvSink::new(&path).read().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Cook");
        assert_eq!(records[0].salary, UNKNOWN);
        assert_eq!(records[0].job_url, UNKNOWN);
    }

    #[test]
    fn test_rewrite_replaces_whole_file_without_leftovers() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path().join("jobs.csv"));

        sink.write(&sample(5)).unwrap();
        sink.write(&sample(2)).unwrap();

        assert_eq!(sink.read().unwrap(), sample(2));
        let files: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writes_never_interleave() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path().join("jobs.csv"));
        let small = sample(3);
        let large = sample(400);

        let writers: Vec<_> = (0..8)
            .map(|i| {
                let sink = sink.clone();
                let batch = if i % 2 == 0 { small.clone() } else { large.clone() };
                tokio::spawn(async move { sink.write_async(batch).await })
            })
            .collect();
        let reader = {
            let sink = sink.clone();
            tokio::spawn(async move {
                let mut seen = Vec::new();
                for _ in 0..20 {
                    if let Ok(records) = sink.read_async().await {
                        seen.push(records.len());
                    }
                    tokio::task::yield_now().await;
                }
                seen
            })
        };

        for writer in writers {
            writer.await.unwrap().unwrap();
        }
        for len in reader.await.unwrap() {
            assert!(len == 3 || len == 400, "partial file with {} rows", len);
        }

        let last = sink.read_async().await.unwrap();
        assert!(last == small || last == large);
    }

    #[test]
    fn test_write_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let sink = CsvSink::new(dir.path().join("out").join("jobs.csv"));
        sink.write(&sample(1)).unwrap();
        assert!(sink.exists());
    }
}
