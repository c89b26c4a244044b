//! Path key resolution and summary filtering.
//!
//! # Responsibilities
//! - Build the path key (path plus raw query) used by every filter decision
//! - Exact-match lookups for skip and check paths
//! - Optional pattern-based skipping
//!
//! # Design Decisions
//! - Exact match only: no trailing-slash, case, or query-order normalization.
//!   `/health?x=1` is not `/health`. Deployed configs rely on this.
//! - Hash sets, built once at installation
//! - Patterns arrive pre-compiled; nothing here can fail

use std::collections::HashSet;
use std::fmt::Debug;
use std::sync::Arc;

use axum::http::Uri;

/// Trait for testing a path key against a configured pattern.
pub trait PathMatcher: Send + Sync + Debug {
    /// Returns true if the path key matches.
    fn matches(&self, path: &str) -> bool;
}

impl PathMatcher for regex::Regex {
    fn matches(&self, path: &str) -> bool {
        self.is_match(path)
    }
}

/// Resolve the path key for a request URI: `path?query`, or `path` when the
/// query is absent or empty.
pub fn resolve_path(uri: &Uri) -> String {
    match uri.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", uri.path(), query),
        _ => uri.path().to_string(),
    }
}

/// Installed filter rules.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    skip: HashSet<String>,
    check: HashSet<String>,
    pattern: Option<Arc<dyn PathMatcher>>,
}

impl PathFilter {
    pub fn new<I, J>(skip: I, check: J, pattern: Option<Arc<dyn PathMatcher>>) -> Self
    where
        I: IntoIterator<Item = String>,
        J: IntoIterator<Item = String>,
    {
        Self {
            skip: skip.into_iter().collect(),
            check: check.into_iter().collect(),
            pattern,
        }
    }

    /// Liveness/check traffic: debug record only, never a summary.
    pub fn is_check(&self, path: &str) -> bool {
        self.check.contains(path)
    }

    /// Whether a summary should be emitted for this path key.
    pub fn should_track(&self, path: &str) -> bool {
        if self.skip.contains(path) {
            return false;
        }
        !self
            .pattern
            .as_ref()
            .is_some_and(|pattern| pattern.matches(path))
    }
}
