//! Per-request correlation context.
//!
//! The interceptor inserts a [`RequestContext`] into the request extensions
//! before the inner service runs. Handlers pull it out with
//! `Extension<RequestContext>` to read the correlation id or to record errors
//! that should appear in the summary record.

use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use uuid::Uuid;

/// Correlation data for one in-flight request.
#[derive(Clone)]
pub struct RequestContext {
    inner: Arc<Inner>,
}

struct Inner {
    id: Uuid,
    started_at: Instant,
    method: String,
    path: String,
    client_ip: String,
    user_agent: String,
    errors: Mutex<Vec<String>>,
}

impl RequestContext {
    pub(crate) fn new(
        started_at: Instant,
        method: String,
        path: String,
        client_ip: String,
        user_agent: String,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                id: Uuid::new_v4(),
                started_at,
                method,
                path,
                client_ip,
                user_agent,
                errors: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Correlation identifier, unique per request.
    pub fn id(&self) -> Uuid {
        self.inner.id
    }

    /// Monotonic time since the request entered the interceptor.
    pub fn elapsed(&self) -> Duration {
        self.inner.started_at.elapsed()
    }

    pub fn method(&self) -> &str {
        &self.inner.method
    }

    /// Resolved path key (path plus query).
    pub fn path(&self) -> &str {
        &self.inner.path
    }

    pub fn client_ip(&self) -> &str {
        &self.inner.client_ip
    }

    /// User-Agent header, empty when the client sent none.
    pub fn user_agent(&self) -> &str {
        &self.inner.user_agent
    }

    /// Record a handler error. Errors are reported in the summary message in
    /// the order they were recorded.
    pub fn record_error(&self, error: impl fmt::Display) {
        self.lock_errors().push(error.to_string());
    }

    /// Snapshot of the errors recorded so far.
    pub fn errors(&self) -> Vec<String> {
        self.lock_errors().clone()
    }

    fn lock_errors(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        // A handler that panicked mid-push cannot leave the Vec inconsistent.
        self.inner
            .errors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("id", &self.inner.id)
            .field("method", &self.inner.method)
            .field("path", &self.inner.path)
            .field("client_ip", &self.inner.client_ip)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ctx() -> RequestContext {
        RequestContext::new(
            Instant::now(),
            "GET".into(),
            "/a?b=1".into(),
            "10.0.0.1".into(),
            String::new(),
        )
    }

    #[test]
    fn test_errors_keep_order() {
        let ctx = ctx();
        ctx.record_error("first");
        ctx.clone().record_error(std::io::Error::other("second"));
        assert_eq!(ctx.errors(), vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<Uuid> = (0..1000).map(|_| ctx().id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_clone_shares_state() {
        let ctx = ctx();
        let other = ctx.clone();
        assert_eq!(ctx.id(), other.id());
        other.record_error("boom");
        assert_eq!(ctx.errors().len(), 1);
    }
}
