//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, bind address parses)
//! - Reject skip patterns that do not compile
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use regex::Regex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("observability.log_level `{0}` is not a valid filter directive")]
    LogLevel(String),

    #[error("logger.skip_path_pattern is invalid: {0}")]
    SkipPattern(String),

    #[error("logger.{field} contains an empty path")]
    EmptyPath { field: &'static str },
}

/// Validate a parsed config.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if let Some(pattern) = &config.logger.skip_path_pattern {
        if let Err(e) = Regex::new(pattern) {
            errors.push(ValidationError::SkipPattern(e.to_string()));
        }
    }

    if config.logger.skip_paths.iter().any(String::is_empty) {
        errors.push(ValidationError::EmptyPath { field: "skip_paths" });
    }
    if config.logger.check_paths.iter().any(String::is_empty) {
        errors.push(ValidationError::EmptyPath { field: "check_paths" });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
