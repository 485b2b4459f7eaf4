pub mod create;
pub mod delete;
pub mod update;

pub use create::{CreateJobCommand, CreateJobError};
pub use delete::{DeleteJobCommand, DeleteJobError, DeleteJobResponse};
pub use update::{UpdateJobCommand, UpdateJobError};
