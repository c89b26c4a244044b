//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::Request;
use request_logger::logger::{LogRecord, LogSink, LoggerConfig, Severity};

/// Sink that keeps every record in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Mutex<Vec<LogRecord>>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn for_path(&self, path: &str) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }

    pub fn summaries(&self) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(LogRecord::is_summary)
            .collect()
    }

    pub fn debug_records(&self) -> Vec<LogRecord> {
        self.records()
            .into_iter()
            .filter(|r| r.level == Severity::Debug && !r.is_summary())
            .collect()
    }
}

impl LogSink for RecordingSink {
    fn emit(&self, record: &LogRecord) {
        self.records.lock().unwrap().push(record.clone());
    }
}

/// Logger config writing into `sink`.
#[allow(dead_code)]
pub fn config_with(sink: &Arc<RecordingSink>) -> LoggerConfig {
    LoggerConfig::new().with_sink(sink.clone())
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}
