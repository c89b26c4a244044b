//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → LoggerSettings::build → LoggerConfig for the request logger
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the interceptor never sees changes
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LogFormat, LoggerSettings, ObservabilityConfig, ServiceConfig};
pub use validation::ValidationError;
