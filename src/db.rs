use std::time::Duration;
use chrono::{DateTime, FixedOffset, Utc};
use sqlx::{Connection, PgConnection};
use tokio::time;

use crate::error::AppError;
use crate::models::DbTime;

// timestamptz decodes as UTC; the session offset is fetched alongside so the
// value can be shown in the session's zone
pub const NOW_QUERY: &str = "SELECT NOW() AS time, EXTRACT(TIMEZONE FROM NOW())::int AS tz;";

#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub connect: Duration,
    pub query: Duration,
}

/// Opens a dedicated connection, reads the server time and closes the
/// connection again before returning.
///
/// `Ok(None)` means the query ran but produced no row. The query is never
/// attempted when the connection cannot be opened.
pub async fn fetch_db_time(
    database_url: &str,
    timeouts: Timeouts
) -> Result<Option<DbTime>, AppError> {

    let mut conn = time::timeout(timeouts.connect, PgConnection::connect(database_url))
        .await
        .map_err(|_| AppError::Timeout { stage: "connect", elapsed: timeouts.connect })?
        .map_err(AppError::Connect)?;

    let result = time::timeout(
        timeouts.query,
        sqlx::query_as::<_, (DateTime<Utc>, i32)>(NOW_QUERY).fetch_optional(&mut conn)
    ).await;

    match result {
        Ok(fetched) => {
            // close even when the query failed so the server slot is freed now
            if let Err(e) = conn.close().await {
                tracing::warn!("Failed to close database connection: {}", e);
            }
            fetched
                .and_then(|row| row.map(|(time, tz)| session_time(time, tz)).transpose())
                .map_err(AppError::Query)
        }
        Err(_) => {
            // connection is mid-query; dropping it closes the socket
            drop(conn);
            Err(AppError::Timeout { stage: "query", elapsed: timeouts.query })
        }
    }

}

/// Shifts the UTC instant into the session's offset.
fn session_time(time: DateTime<Utc>, offset_secs: i32) -> Result<DbTime, sqlx::Error> {

    let offset = FixedOffset::east_opt(offset_secs).ok_or_else(|| {
        sqlx::Error::Decode(format!("time zone offset out of range: {}s", offset_secs).into())
    })?;

    Ok(DbTime(time.with_timezone(&offset)))

}
