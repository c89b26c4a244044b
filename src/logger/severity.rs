//! Status code to log severity mapping.
//!
//! # Design Decisions
//! - Pure function over an ordered range table, first match wins
//! - Anything not covered by the table is `Info` (1xx, 2xx, 3xx)

use std::fmt;
use std::ops::RangeInclusive;

/// Severity of an emitted log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Severity> for tracing::Level {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Debug => tracing::Level::DEBUG,
            Severity::Info => tracing::Level::INFO,
            Severity::Warn => tracing::Level::WARN,
            Severity::Error => tracing::Level::ERROR,
        }
    }
}

const STATUS_SEVERITY: [(RangeInclusive<u16>, Severity); 2] = [
    (400..=499, Severity::Warn),
    (500..=u16::MAX, Severity::Error),
];

/// Severity for a final response status.
pub fn severity_for_status(status: u16) -> Severity {
    STATUS_SEVERITY
        .iter()
        .find(|(range, _)| range.contains(&status))
        .map(|(_, severity)| *severity)
        .unwrap_or(Severity::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_partition() {
        assert_eq!(severity_for_status(200), Severity::Info);
        assert_eq!(severity_for_status(301), Severity::Info);
        assert_eq!(severity_for_status(404), Severity::Warn);
        assert_eq!(severity_for_status(499), Severity::Warn);
        assert_eq!(severity_for_status(500), Severity::Error);
        assert_eq!(severity_for_status(503), Severity::Error);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(severity_for_status(0), Severity::Info);
        assert_eq!(severity_for_status(100), Severity::Info);
        assert_eq!(severity_for_status(399), Severity::Info);
        assert_eq!(severity_for_status(400), Severity::Warn);
        assert_eq!(severity_for_status(u16::MAX), Severity::Error);
    }

    #[test]
    fn test_tracing_level() {
        assert_eq!(tracing::Level::from(Severity::Warn), tracing::Level::WARN);
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
