use chrono::{DateTime, FixedOffset, Timelike};
use serde::Serialize;

/// Current time as reported by the database server, in the session's
/// time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DbTime(pub DateTime<FixedOffset>);

/// How a `DbTime` is written into the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFormat {
    /// `2024-05-01T12:30:45.123456+02:00`, fraction trimmed of trailing
    /// zeros, `Z` for a zero offset
    Rfc3339Nano,
    /// `2024-05-01T12:30:45.123456+02:00`, six-digit fraction only when
    /// non-zero, offset always numeric
    Iso,
}

impl DbTime {

    pub fn render(&self, format: TimeFormat) -> String {

        // formats the local wall clock of the stored offset
        let base = self.0.format("%Y-%m-%dT%H:%M:%S");
        // leap seconds are reported as nanos >= 1e9
        let nanos = self.0.nanosecond() % 1_000_000_000;
        let offset_secs = self.0.offset().local_minus_utc();

        match format {
            TimeFormat::Rfc3339Nano => {
                let fraction = format!(".{:09}", nanos);
                let fraction = fraction.trim_end_matches('0');
                let fraction = if fraction == "." { "" } else { fraction };
                let offset = if offset_secs == 0 {
                    "Z".to_string()
                } else {
                    offset_text(offset_secs, false)
                };
                format!("{}{}{}", base, fraction, offset)
            }
            TimeFormat::Iso => {
                let micros = nanos / 1_000;
                let offset = offset_text(offset_secs, true);
                if micros == 0 {
                    format!("{}{}", base, offset)
                } else {
                    format!("{}.{:06}{}", base, micros, offset)
                }
            }
        }

    }

    pub fn message(&self, format: TimeFormat) -> String {

        format!("Database time: {}", self.render(format))

    }

}

/// `+HH:MM`, with `:SS` appended only when asked for and non-zero.
fn offset_text(offset_secs: i32, with_seconds: bool) -> String {

    let sign = if offset_secs < 0 { '-' } else { '+' };
    let abs = offset_secs.unsigned_abs();
    let (hours, minutes, seconds) = (abs / 3600, (abs % 3600) / 60, abs % 60);

    if with_seconds && seconds != 0 {
        format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds)
    } else {
        format!("{}{:02}:{:02}", sign, hours, minutes)
    }

}

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub success: u64,
    pub no_rows: u64,
    pub not_configured: u64,
    pub connect_failed: u64,
    pub timed_out: u64,
    pub query_failed: u64,
    pub total_requests: u64,
    pub success_rate: f64,
}
