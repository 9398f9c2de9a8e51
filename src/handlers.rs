use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::time::Instant;

use crate::AppState;
use crate::db;
use crate::error::AppError;
use crate::logger::append_request;
use crate::metrics::Outcome;
use crate::models::{DbTime, MetricsResponse, TimeFormat};

pub const TIME_ROUTE: &str = "/backend-service";
pub const ISO_TIME_ROUTE: &str = "/backend-service2";

pub async fn health_check() -> &'static str {

    "OK"

}

pub async fn metrics(State(state): State<AppState>) -> Json<MetricsResponse> {

    Json(state.metrics.snapshot().to_response())

}

/// Any method. Body is `Database time: <RFC 3339 with trimmed nanos>`.
pub async fn db_time(State(state): State<AppState>) -> Response {

    respond(&state, TIME_ROUTE, TimeFormat::Rfc3339Nano).await

}

/// GET only. Body is the JSON string `"Database time: <ISO 8601>"`.
pub async fn db_time_iso(State(state): State<AppState>) -> Response {

    respond(&state, ISO_TIME_ROUTE, TimeFormat::Iso).await

}

async fn lookup(state: &AppState) -> Result<Option<DbTime>, AppError> {

    // read on every request, never cached
    let database_url = state.config.database_url
        .resolve()
        .ok_or(AppError::NotConfigured)?;

    db::fetch_db_time(&database_url, state.timeouts()).await

}

async fn respond(state: &AppState, route: &'static str, format: TimeFormat) -> Response {

    let started = Instant::now();
    let result = lookup(state).await;

    finish(state, route, format, started, result).await

}

/// Records the outcome and turns the lookup result into the response.
async fn finish(
    state: &AppState,
    route: &'static str,
    format: TimeFormat,
    started: Instant,
    result: Result<Option<DbTime>, AppError>
) -> Response {

    let outcome = match &result {
        Ok(Some(_)) => Outcome::Success,
        Ok(None) => Outcome::NoRows,
        Err(e) => e.outcome(),
    };

    state.metrics.record(outcome);
    if let Some(log_path) = &state.config.log_path {
        append_request(log_path.clone(), route, outcome, started.elapsed()).await;
    }

    match result {
        Ok(Some(time)) => match format {
            TimeFormat::Rfc3339Nano => (StatusCode::OK, time.message(format)).into_response(),
            TimeFormat::Iso => (StatusCode::OK, Json(time.message(format))).into_response(),
        },
        Ok(None) => {
            tracing::warn!(route, "No rows were returned!");
            StatusCode::OK.into_response()
        }
        Err(e) => {
            match &e {
                AppError::Query(_) => tracing::error!(route, "Unknown database error: {}", e),
                _ => tracing::error!(route, "{}", e),
            }
            e.into_response()
        }
    }

}
