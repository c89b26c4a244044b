//! Log records produced by the interceptor.

use std::time::Duration;

use crate::logger::severity::{severity_for_status, Severity};

/// Message of a summary record without handler errors.
pub const SUMMARY_MESSAGE: &str = "request summary";

/// Message of the pre-request record for ordinary traffic.
pub const REQUEST_DETECTED: &str = "request detected";

/// Message of the pre-request record for check paths.
pub const CHECK_DETECTED: &str = "check detected";

/// One structured log record handed to a [`LogSink`](crate::logger::LogSink).
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    pub level: Severity,
    pub message: String,
    pub layer: String,
    pub uuid: String,
    pub method: String,
    pub path: String,
    pub ip: String,
    /// Omitted from pre-request records when the client sent no User-Agent.
    pub user_agent: Option<String>,
    /// Present only on summary records.
    pub outcome: Option<Outcome>,
}

impl LogRecord {
    pub fn is_summary(&self) -> bool {
        self.outcome.is_some()
    }
}

/// Result of a completed request.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub status: u16,
    pub latency: Duration,
    /// Completion timestamp, RFC 3339, UTC or local per configuration.
    pub time: String,
    pub errors: Vec<String>,
}

impl Outcome {
    pub fn severity(&self) -> Severity {
        severity_for_status(self.status)
    }

    /// `error #1: a, error #2: b`, or [`SUMMARY_MESSAGE`] without errors.
    pub fn message(&self) -> String {
        summary_message(&self.errors)
    }
}

/// Compose the summary message from accumulated handler errors.
pub fn summary_message(errors: &[String]) -> String {
    if errors.is_empty() {
        return SUMMARY_MESSAGE.to_string();
    }
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("error #{}: {}", i + 1, err))
        .collect::<Vec<_>>()
        .join(", ")
}
