use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use chrono::Utc;

use crate::metrics::Outcome;

pub fn format_entry(route: &str, outcome: Outcome, elapsed: Duration) -> String {

    let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        "{} | {:20} | {:14} | {:>6} ms\n",
        timestamp,
        route,
        outcome.as_str(),
        elapsed.as_millis()
    )

}

/// Appends one access line to `log_path`. Failures go to the diagnostic
/// stream and never fail the request.
pub fn log_request(log_path: &Path, route: &str, outcome: Outcome, elapsed: Duration) {

    let log_entry = format_entry(route, outcome, elapsed);

    match OpenOptions::new().create(true).append(true).open(log_path) {
        Ok(mut file) => {
            if let Err(e) = file.write_all(log_entry.as_bytes()) {
                tracing::warn!("Failed to write to log file {}: {}", log_path.display(), e);
            }
        }
        Err(e) => {
            tracing::warn!("Failed to open log file {}: {}", log_path.display(), e);
        }
    }

}

/// Runs `log_request` on the blocking pool so file I/O stays off the async
/// workers. Waits for the write so lines land in request order per task.
pub async fn append_request(log_path: PathBuf, route: &'static str, outcome: Outcome, elapsed: Duration) {

    let written = tokio::task::spawn_blocking(move || {
        log_request(&log_path, route, outcome, elapsed)
    }).await;

    if let Err(e) = written {
        tracing::warn!("Access log writer task failed: {}", e);
    }

}
