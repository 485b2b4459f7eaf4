//! Stored job management
//!
//! CRUD over the `jobs` table. Writes are commands, reads are queries; every
//! handler takes the pool by value and returns its own error enum, which the
//! routes convert into [`AppError`](crate::error::AppError).

pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    CreateJobCommand, CreateJobError, DeleteJobCommand, DeleteJobError, DeleteJobResponse,
    UpdateJobCommand, UpdateJobError,
};
pub use queries::{GetJobError, GetJobQuery, ListJobsError, ListJobsQuery};
pub use routes::jobs_routes;
