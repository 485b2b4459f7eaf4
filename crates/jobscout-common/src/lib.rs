//! jobscout common library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types and utilities for the jobscout workspace.
//!
//! # Overview
//!
//! - **Records**: the canonical [`JobRecord`] shape shared by the extractor,
//!   the CSV sink and the database loader
//! - **Logging**: tracing subscriber setup used by every binary
//!
//! # Example
//!
//! ```
//! use jobscout_common::{JobRecord, JobType, UNKNOWN};
//!
//! let mut record = JobRecord::untitled();
//! assert!(!record.has_title());
//!
//! record.title = "Backend Engineer".to_string();
//! record.job_type = JobType::from_metadata("Full-time, on site").to_string();
//! assert_eq!(record.job_type, "Full-time");
//! assert_eq!(record.salary, UNKNOWN);
//! ```

pub mod logging;
pub mod record;

// Re-export commonly used types
pub use record::{JobKey, JobRecord, JobType, CSV_COLUMNS, UNKNOWN};
