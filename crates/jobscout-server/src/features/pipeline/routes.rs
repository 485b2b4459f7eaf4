//! Pipeline API routes
//!
//! - `POST /run-scraper` - Scrape a search into the CSV file
//! - `POST /load-database` - Load the CSV file into the store
//! - `GET /stats` - CSV presence, store connectivity and job count

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::commands::RunScraperCommand;
use crate::api::response::ApiResponse;
use crate::error::AppError;
use crate::features::FeatureState;

pub fn pipeline_routes() -> Router<FeatureState> {
    Router::new()
        .route("/run-scraper", post(run_scraper))
        .route("/load-database", post(load_database))
        .route("/stats", get(stats))
}

/// `POST /run-scraper`
///
/// ```json
/// { "position": "Software Engineer", "city": "Austin", "date_posted": "7", "max_pages": 2 }
/// ```
///
/// - `200 OK` - Scrape report; `success` is false when nothing was found
/// - `400 Bad Request` - Missing position or city, or `max_pages` of 0
#[tracing::instrument(skip(state, body))]
async fn run_scraper(
    State(state): State<FeatureState>,
    body: Result<Json<RunScraperCommand>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(command) = body?;
    let report = super::commands::run_scraper::handle(&state.paginator, &state.sink, command).await?;

    Ok(ApiResponse::success(report).into_response())
}

/// `POST /load-database`
///
/// - `200 OK` - Inserted, duplicate and total counts
/// - `400 Bad Request` - No CSV file yet
#[tracing::instrument(skip(state))]
async fn load_database(State(state): State<FeatureState>) -> Result<Response, AppError> {
    let summary = super::commands::load_database::handle(state.db, &state.sink).await?;

    Ok(ApiResponse::success(summary).into_response())
}

async fn stats(State(state): State<FeatureState>) -> Response {
    let stats = super::queries::stats::handle(state.db, &state.sink).await;
    ApiResponse::success(stats).into_response()
}
