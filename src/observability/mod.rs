//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request logger (TracingSink) and host logs
//!     → tracing events
//!     → logging.rs subscriber (EnvFilter + fmt, pretty or JSON)
//!     → stdout
//! ```

pub mod logging;
