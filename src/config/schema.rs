//! Configuration schema definitions.
//!
//! This module defines the configuration structure of the service hosting the
//! request logger. All types derive Serde traits for deserialization from
//! config files.

use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::logger::LoggerConfig;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Process-wide logging settings.
    pub observability: ObservabilityConfig,

    /// Request logger settings.
    pub logger: LoggerSettings,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or `EnvFilter` directive (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON lines.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

/// The `[logger]` section: file form of [`LoggerConfig`].
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoggerSettings {
    /// Completion timestamps in UTC instead of local time.
    pub use_utc: bool,

    /// Exact path keys (path plus query) excluded from summaries.
    pub skip_paths: Vec<String>,

    /// Regular expression; matching path keys are excluded from summaries.
    pub skip_path_pattern: Option<String>,

    /// Exact path keys treated as liveness checks.
    pub check_paths: Vec<String>,

    /// Layer label attached to every record.
    pub app_layer: Option<String>,
}

impl LoggerSettings {
    /// Build the interceptor config, compiling the skip pattern.
    pub fn build(&self) -> Result<LoggerConfig, regex::Error> {
        let mut config = LoggerConfig::new()
            .use_utc(self.use_utc)
            .skip_paths(self.skip_paths.iter().cloned())
            .check_paths(self.check_paths.iter().cloned());

        if let Some(pattern) = &self.skip_path_pattern {
            config.skip_path_pattern = Some(Arc::new(Regex::new(pattern)?));
        }
        if let Some(app_layer) = &self.app_layer {
            config = config.app_layer(app_layer.clone());
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::PathMatcher;

    #[test]
    fn test_minimal_config() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.timeouts.request_secs, 30);
        assert_eq!(config.observability.log_format, LogFormat::Pretty);
        assert!(config.logger.skip_paths.is_empty());
    }

    #[test]
    fn test_logger_section() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [observability]
            log_level = "debug"
            log_format = "json"

            [logger]
            use_utc = true
            skip_paths = ["/health"]
            skip_path_pattern = "^/static/"
            check_paths = ["/ping"]
            app_layer = "edge"
            "#,
        )
        .unwrap();

        assert_eq!(config.observability.log_format, LogFormat::Json);
        let logger = config.logger.build().unwrap();
        assert!(logger.use_utc);
        assert_eq!(logger.skip_paths, vec!["/health".to_string()]);
        assert_eq!(logger.check_paths, vec!["/ping".to_string()]);
        assert_eq!(logger.app_layer, "edge");
        assert!(logger
            .skip_path_pattern
            .as_ref()
            .is_some_and(|p| p.matches("/static/app.css")));
    }

    #[test]
    fn test_bad_pattern() {
        let settings = LoggerSettings {
            skip_path_pattern: Some("(".to_string()),
            ..Default::default()
        };
        assert!(settings.build().is_err());
    }
}
