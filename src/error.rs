use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::time::Duration;

use crate::metrics::Outcome;

/// Failures while fetching the database time.
///
/// Every variant maps to an explicit status code; none of them aborts the
/// request task.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("database connection string is not configured")]
    NotConfigured,

    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("database {stage} timed out after {elapsed:?}")]
    Timeout { stage: &'static str, elapsed: Duration },

    #[error("database query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl AppError {

    pub fn status(&self) -> StatusCode {

        match self {
            AppError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Connect(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            AppError::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }

    }

    pub fn outcome(&self) -> Outcome {

        match self {
            AppError::NotConfigured => Outcome::NotConfigured,
            AppError::Connect(_) => Outcome::ConnectFailed,
            AppError::Timeout { .. } => Outcome::TimedOut,
            AppError::Query(_) => Outcome::QueryFailed,
        }

    }

    // client-facing text; driver errors can carry host names and users
    fn public_message(&self) -> &'static str {

        match self {
            AppError::NotConfigured => "Database is not configured",
            AppError::Connect(_) => "Database unavailable",
            AppError::Timeout { .. } => "Database timed out",
            AppError::Query(_) => "Unknown database error",
        }

    }

}

impl IntoResponse for AppError {

    fn into_response(self) -> Response {

        (self.status(), self.public_message()).into_response()

    }

}
