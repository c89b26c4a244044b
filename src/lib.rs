//! HTTP request logging middleware for tower/axum services.
//!
//! [`RequestLoggerLayer`] wraps a service and emits a debug record when a
//! request arrives and a summary record (status, latency, handler errors)
//! when it completes, at a severity derived from the status code.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod logger;
pub mod observability;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use logger::{LogSink, LoggerConfig, RequestContext, RequestLoggerLayer};
