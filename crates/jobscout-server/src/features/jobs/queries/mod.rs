pub mod get;
pub mod list;

pub use get::{GetJobError, GetJobQuery};
pub use list::{ListJobsError, ListJobsQuery};
