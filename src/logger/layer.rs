//! The request logging layer.
//!
//! # Design Decisions
//! - Config is resolved once in [`RequestLoggerLayer::new`] and shared via
//!   `Arc` by every service the layer produces
//! - The summary is owned by a drop guard inside the response future, so it is
//!   recorded on `Ok`, on `Err`, on panic unwinding (in `call` or while
//!   polling) and on cancellation
//! - Sink panics are contained; logging never fails a request

use std::fmt;
use std::future::Future;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::{Request, Response};
use chrono::{Local, SecondsFormat, Utc};
use futures_util::future::{BoxFuture, FutureExt};
use tower::{Layer, Service};

use crate::http::request::{client_ip, user_agent};
use crate::logger::context::RequestContext;
use crate::logger::filter::{resolve_path, PathFilter, PathMatcher};
use crate::logger::record::{LogRecord, Outcome, CHECK_DETECTED, REQUEST_DETECTED};
use crate::logger::severity::Severity;
use crate::logger::sink::{LogSink, TracingSink};

/// Layer label used when none is configured.
pub const DEFAULT_APP_LAYER: &str = "gin";

/// Status recorded when the response future is dropped before completing.
pub const STATUS_CLIENT_CLOSED_REQUEST: u16 = 499;

/// Status recorded when the inner service returns an error or panics.
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Interceptor configuration. Every field is optional.
#[derive(Debug, Clone, Default)]
pub struct LoggerConfig {
    /// Sink override; [`TracingSink`] when absent.
    pub sink: Option<Arc<dyn LogSink>>,

    /// Render the completion timestamp in UTC instead of local time.
    pub use_utc: bool,

    /// Exact path keys (path plus query) that never get a summary.
    pub skip_paths: Vec<String>,

    /// Path keys matching this pattern never get a summary.
    pub skip_path_pattern: Option<Arc<dyn PathMatcher>>,

    /// Exact path keys treated as liveness checks: debug record only.
    pub check_paths: Vec<String>,

    /// Label attached to every record; [`DEFAULT_APP_LAYER`] when empty.
    pub app_layer: String,
}

impl LoggerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn use_utc(mut self, use_utc: bool) -> Self {
        self.use_utc = use_utc;
        self
    }

    pub fn skip_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.skip_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn skip_path_pattern(mut self, matcher: impl PathMatcher + 'static) -> Self {
        self.skip_path_pattern = Some(Arc::new(matcher));
        self
    }

    pub fn check_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.check_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    pub fn app_layer(mut self, app_layer: impl Into<String>) -> Self {
        self.app_layer = app_layer.into();
        self
    }
}

/// Installed, read-only interceptor state.
#[derive(Debug)]
struct Shared {
    sink: Arc<dyn LogSink>,
    use_utc: bool,
    filter: PathFilter,
    app_layer: String,
}

impl Shared {
    fn from_config(config: LoggerConfig) -> Self {
        let app_layer = if config.app_layer.is_empty() {
            DEFAULT_APP_LAYER.to_string()
        } else {
            config.app_layer
        };

        Self {
            sink: config.sink.unwrap_or_else(|| Arc::new(TracingSink)),
            use_utc: config.use_utc,
            filter: PathFilter::new(config.skip_paths, config.check_paths, config.skip_path_pattern),
            app_layer,
        }
    }

    fn emit(&self, record: LogRecord) {
        let sink = &self.sink;
        let _ = catch_unwind(AssertUnwindSafe(|| sink.emit(&record)));
    }

    fn base_record(&self, ctx: &RequestContext, level: Severity, message: String) -> LogRecord {
        LogRecord {
            level,
            message,
            layer: self.app_layer.clone(),
            uuid: ctx.id().to_string(),
            method: ctx.method().to_string(),
            path: ctx.path().to_string(),
            ip: ctx.client_ip().to_string(),
            user_agent: None,
            outcome: None,
        }
    }

    fn request_detected(&self, ctx: &RequestContext, is_check: bool) {
        let message = if is_check { CHECK_DETECTED } else { REQUEST_DETECTED };
        let mut record = self.base_record(ctx, Severity::Debug, message.to_string());
        if !ctx.user_agent().is_empty() {
            record.user_agent = Some(ctx.user_agent().to_string());
        }
        self.emit(record);
    }

    fn summarize(&self, ctx: &RequestContext, status: u16) {
        if !self.filter.should_track(ctx.path()) {
            return;
        }

        let latency = ctx.elapsed();
        let time = if self.use_utc {
            Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
        } else {
            Local::now().to_rfc3339_opts(SecondsFormat::Millis, false)
        };

        let outcome = Outcome {
            status,
            latency,
            time,
            errors: ctx.errors(),
        };

        let mut record = self.base_record(ctx, outcome.severity(), outcome.message());
        record.user_agent = Some(ctx.user_agent().to_string());
        record.outcome = Some(outcome);
        self.emit(record);
    }
}

/// Tower layer installing [`RequestLogger`] around a service.
#[derive(Debug, Clone)]
pub struct RequestLoggerLayer {
    shared: Arc<Shared>,
}

impl RequestLoggerLayer {
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            shared: Arc::new(Shared::from_config(config)),
        }
    }

    /// Label attached to every record emitted by this layer.
    pub fn app_layer(&self) -> &str {
        &self.shared.app_layer
    }
}

impl Default for RequestLoggerLayer {
    fn default() -> Self {
        Self::new(LoggerConfig::default())
    }
}

impl<S> Layer<S> for RequestLoggerLayer {
    type Service = RequestLogger<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestLogger {
            inner,
            shared: self.shared.clone(),
        }
    }
}

/// Service logging one debug record before and one summary after each request.
#[derive(Debug, Clone)]
pub struct RequestLogger<S> {
    inner: S,
    shared: Arc<Shared>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestLogger<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: fmt::Display + 'static,
    ResBody: 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let started_at = Instant::now();
        let ctx = RequestContext::new(
            started_at,
            req.method().to_string(),
            resolve_path(req.uri()),
            client_ip(&req),
            user_agent(&req),
        );
        req.extensions_mut().insert(ctx.clone());

        let is_check = self.shared.filter.is_check(ctx.path());
        self.shared.request_detected(&ctx, is_check);

        let mut summary = SummaryGuard {
            shared: self.shared.clone(),
            ctx: (!is_check).then_some(ctx),
        };
        let inner = &mut self.inner;
        match catch_unwind(AssertUnwindSafe(|| inner.call(req))) {
            Ok(future) => Box::pin(finish(future, summary)),
            Err(panic) => {
                summary.complete(STATUS_INTERNAL_ERROR);
                resume_unwind(panic);
            }
        }
    }
}

async fn finish<F, ResBody, E>(future: F, mut summary: SummaryGuard) -> Result<Response<ResBody>, E>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
    E: fmt::Display,
{
    let result = match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result,
        Err(panic) => {
            summary.complete(STATUS_INTERNAL_ERROR);
            resume_unwind(panic);
        }
    };

    match &result {
        Ok(response) => summary.complete(response.status().as_u16()),
        Err(err) => {
            summary.record_error(err);
            summary.complete(STATUS_INTERNAL_ERROR);
        }
    }
    result
}

/// Emits the summary exactly once: on completion, or on drop if the response
/// future never completed.
struct SummaryGuard {
    shared: Arc<Shared>,
    // None for check paths and after the summary went out.
    ctx: Option<RequestContext>,
}

impl SummaryGuard {
    fn record_error(&self, err: impl fmt::Display) {
        if let Some(ctx) = &self.ctx {
            ctx.record_error(err);
        }
    }

    fn complete(&mut self, status: u16) {
        if let Some(ctx) = self.ctx.take() {
            self.shared.summarize(&ctx, status);
        }
    }
}

impl Drop for SummaryGuard {
    fn drop(&mut self) {
        self.complete(STATUS_CLIENT_CLOSED_REQUEST);
    }
}
