//! Request logging interceptor.
//!
//! # Data Flow
//! ```text
//! Request
//!     → layer.rs (start clock, build RequestContext, resolve path key)
//!     → sink (debug: "request detected" / "check detected")
//!     → inner service (handlers may record errors on the context)
//!     → filter.rs (check path? skip path? skip pattern?)
//!     → severity.rs (status → info / warn / error)
//!     → sink (summary record)
//! ```
//!
//! # Design Decisions
//! - One record before and at most one summary after every request
//! - Skip rules suppress the summary only; the debug record always fires
//! - Severity depends on the status alone, never on the error count
//! - Nothing here can fail the request being served

pub mod context;
pub mod filter;
pub mod layer;
pub mod record;
pub mod severity;
pub mod sink;

pub use context::RequestContext;
pub use filter::{resolve_path, PathFilter, PathMatcher};
pub use layer::{
    LoggerConfig, RequestLogger, RequestLoggerLayer, DEFAULT_APP_LAYER,
    STATUS_CLIENT_CLOSED_REQUEST, STATUS_INTERNAL_ERROR,
};
pub use record::{LogRecord, Outcome};
pub use severity::{severity_for_status, Severity};
pub use sink::{LogSink, TracingSink};
