//! Log sinks.
//!
//! # Design Decisions
//! - `emit` has no error return: a sink that cannot deliver a record drops it
//! - Sinks are shared by all in-flight requests, hence `Send + Sync`
//! - The default sink forwards to `tracing`; formatting and output belong to
//!   whatever subscriber the host installed

use std::fmt::Debug;

use crate::logger::record::LogRecord;
use crate::logger::severity::Severity;

/// Target of every event emitted by [`TracingSink`].
pub const TRACING_TARGET: &str = "request_logger";

/// Destination for interceptor records.
pub trait LogSink: Send + Sync + Debug {
    fn emit(&self, record: &LogRecord);
}

/// Default sink: one `tracing` event per record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

// Levels in `tracing::event!` must be constants, so dispatch per severity.
macro_rules! emit_at {
    ($level:expr, $record:expr) => {{
        let record = $record;
        match &record.outcome {
            Some(outcome) => tracing::event!(
                target: TRACING_TARGET,
                $level,
                layer = %record.layer,
                uuid = %record.uuid,
                status = u64::from(outcome.status),
                method = %record.method,
                path = %record.path,
                ip = %record.ip,
                latency = ?outcome.latency,
                user_agent = record.user_agent.as_deref().unwrap_or_default(),
                time = %outcome.time,
                "{}",
                record.message
            ),
            None => tracing::event!(
                target: TRACING_TARGET,
                $level,
                layer = %record.layer,
                uuid = %record.uuid,
                method = %record.method,
                path = %record.path,
                ip = %record.ip,
                user_agent = record.user_agent.as_deref(),
                "{}",
                record.message
            ),
        }
    }};
}

impl LogSink for TracingSink {
    fn emit(&self, record: &LogRecord) {
        match record.level {
            Severity::Debug => emit_at!(tracing::Level::DEBUG, record),
            Severity::Info => emit_at!(tracing::Level::INFO, record),
            Severity::Warn => emit_at!(tracing::Level::WARN, record),
            Severity::Error => emit_at!(tracing::Level::ERROR, record),
        }
    }
}
