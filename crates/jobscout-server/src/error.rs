//! Server-specific error types

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sqlx::migrate::MigrateError;
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::db::{self, DbError};

/// Message returned when the store cannot be reached
pub const DATABASE_UNAVAILABLE: &str =
    "Database unavailable. Check DATABASE_URL and that the database is reachable.";

/// Application error types
///
/// Every feature error converts into one of these; the HTTP status and the
/// envelope `code` are derived from the variant.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Internal(_) | AppError::Database(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to a client
    fn public_message(&self) -> String {
        match self {
            AppError::NotFound(message)
            | AppError::BadRequest(message)
            | AppError::Conflict(message) => message.clone(),
            AppError::Internal(message) => {
                tracing::error!("Internal error: {}", message);
                "An internal error occurred".to_string()
            },
            AppError::Database(e) if db::is_connectivity_error(e) => {
                tracing::error!(error = %e, "Database unreachable");
                DATABASE_UNAVAILABLE.to_string()
            },
            AppError::Database(e) => {
                tracing::error!(error = ?e, "Database error");
                "A database error occurred".to_string()
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse::new(self.code(), self.public_message());
        (status, Json(body)).into_response()
    }
}

impl From<DbError> for AppError {
    /// Store errors wrapped by connect or migrate keep their `sqlx::Error`,
    /// so connectivity failures still surface as [`DATABASE_UNAVAILABLE`].
    fn from(err: DbError) -> Self {
        match err {
            DbError::Sqlx(e)
            | DbError::Connect { source: e, .. }
            | DbError::Migrate(MigrateError::Execute(e))
            | DbError::Migrate(MigrateError::ExecuteMigration(e, _)) => AppError::Database(e),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
