use std::sync::atomic::{AtomicU64, Ordering};
use serde::Serialize;

use crate::models::MetricsResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Success,
    NoRows,
    NotConfigured,
    ConnectFailed,
    TimedOut,
    QueryFailed,
}

impl Outcome {

    pub fn as_str(&self) -> &'static str {

        match self {
            Outcome::Success => "success",
            Outcome::NoRows => "no_rows",
            Outcome::NotConfigured => "not_configured",
            Outcome::ConnectFailed => "connect_failed",
            Outcome::TimedOut => "timed_out",
            Outcome::QueryFailed => "query_failed",
        }

    }

}

#[derive(Debug, Default)]
pub struct Metrics {
    pub success: AtomicU64,
    pub no_rows: AtomicU64,
    pub not_configured: AtomicU64,
    pub connect_failed: AtomicU64,
    pub timed_out: AtomicU64,
    pub query_failed: AtomicU64,
    pub total_requests: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {

        Self::default()

    }

    pub fn record(&self, outcome: Outcome) {

        let counter = match outcome {
            Outcome::Success => &self.success,
            Outcome::NoRows => &self.no_rows,
            Outcome::NotConfigured => &self.not_configured,
            Outcome::ConnectFailed => &self.connect_failed,
            Outcome::TimedOut => &self.timed_out,
            Outcome::QueryFailed => &self.query_failed,
        };

        counter.fetch_add(1, Ordering::Relaxed);
        self.total_requests.fetch_add(1, Ordering::Relaxed);

    }

    pub fn snapshot(&self) -> MetricsSnapshot {

        MetricsSnapshot {
            success: self.success.load(Ordering::Relaxed),
            no_rows: self.no_rows.load(Ordering::Relaxed),
            not_configured: self.not_configured.load(Ordering::Relaxed),
            connect_failed: self.connect_failed.load(Ordering::Relaxed),
            timed_out: self.timed_out.load(Ordering::Relaxed),
            query_failed: self.query_failed.load(Ordering::Relaxed),
            total_requests: self.total_requests.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub success: u64,
    pub no_rows: u64,
    pub not_configured: u64,
    pub connect_failed: u64,
    pub timed_out: u64,
    pub query_failed: u64,
    pub total_requests: u64,
}

impl MetricsSnapshot {
    pub fn success_rate(&self) -> f64 {

        if self.total_requests == 0 {
            return 0.0;
        }
        (self.success as f64 / self.total_requests as f64) * 100.0

    }

    pub fn to_response(&self) -> MetricsResponse {

        MetricsResponse {
            success: self.success,
            no_rows: self.no_rows,
            not_configured: self.not_configured,
            connect_failed: self.connect_failed,
            timed_out: self.timed_out,
            query_failed: self.query_failed,
            total_requests: self.total_requests,
            success_rate: self.success_rate(),
        }

    }
}
