//! Job API routes
//!
//! # Route Structure
//!
//! - `GET /api/jobs?city=&position=` - List jobs, optionally filtered
//! - `POST /api/jobs` - Create a job by hand
//! - `GET /api/jobs/:id` - Get a single job
//! - `PUT /api/jobs/:id` - Partially update a job
//! - `DELETE /api/jobs/:id` - Delete a job
//!
//! ```rust,ignore
//! use axum::Router;
//! use jobscout_server::features::jobs::jobs_routes;
//!
//! let app = Router::new()
//!     .nest("/api/jobs", jobs_routes())
//!     .with_state(pool);
//! ```

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use sqlx::SqlitePool;

use super::{
    commands::{CreateJobCommand, DeleteJobCommand, UpdateJobCommand},
    queries::{GetJobQuery, ListJobsQuery},
};
use crate::api::response::ApiResponse;
use crate::error::AppError;

pub fn jobs_routes() -> Router<SqlitePool> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/:id", get(get_job).put(update_job).delete(delete_job))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// `POST /api/jobs`
///
/// - `201 Created` - Job stored
/// - `400 Bad Request` - Missing title/company or malformed body
/// - `409 Conflict` - Same title, company and location already stored
#[tracing::instrument(skip(pool, body))]
async fn create_job(
    State(pool): State<SqlitePool>,
    body: Result<Json<CreateJobCommand>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(command) = body?;
    let job = super::commands::create::handle(pool, command).await?;

    tracing::info!(job_id = job.id, "Job created via API");

    Ok(ApiResponse::success(job).with_status(StatusCode::CREATED))
}

/// `PUT /api/jobs/:id`
///
/// - `200 OK` - Updated job
/// - `400 Bad Request` - No recognized fields
/// - `404 Not Found` - Unknown id
/// - `409 Conflict` - Change collides with another job
#[tracing::instrument(skip(pool, path, body))]
async fn update_job(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<UpdateJobCommand>, JsonRejection>,
) -> Result<Response, AppError> {
    let Path(id) = path?;
    let Json(mut command) = body?;
    command.id = id;

    let job = super::commands::update::handle(pool, command).await?;

    tracing::info!(job_id = job.id, "Job updated via API");

    Ok(ApiResponse::success(job).into_response())
}

/// `DELETE /api/jobs/:id`
#[tracing::instrument(skip(pool, path))]
async fn delete_job(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = path?;
    let response = super::commands::delete::handle(pool, DeleteJobCommand { id }).await?;

    Ok(ApiResponse::success(response).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

#[tracing::instrument(skip(pool, path))]
async fn get_job(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Response, AppError> {
    let Path(id) = path?;
    let job = super::queries::get::handle(pool, GetJobQuery { id }).await?;

    Ok(ApiResponse::success(job).into_response())
}

/// `GET /api/jobs?city=Austin&position=engineer`
///
/// The number of returned jobs is echoed in `meta.count`.
#[tracing::instrument(skip(pool, query))]
async fn list_jobs(
    State(pool): State<SqlitePool>,
    query: Result<Query<ListJobsQuery>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(query) = query?;
    let items = super::queries::list::handle(pool, query).await?;

    let meta = json!({ "count": items.len() });
    Ok(ApiResponse::success_with_meta(items, meta).into_response())
}
