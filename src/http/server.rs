//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with the demo handlers
//! - Wire up middleware (request logger, timeout, panic recovery)
//! - Bind server to listener
//! - Graceful shutdown
//!
//! Layer order, outermost first: request logger → timeout → panic recovery →
//! handlers. The logger therefore sees the 408 of a timed-out request and the
//! 500 of a recovered panic as ordinary responses.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Router,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{catch_panic::CatchPanicLayer, timeout::TimeoutLayer};

use crate::config::ServiceConfig;
use crate::lifecycle::wait_for_shutdown;
use crate::logger::{LoggerConfig, RequestContext, RequestLoggerLayer};

/// HTTP server hosting the request logger.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server. `logger` is installed in front of every route.
    pub fn new(config: ServiceConfig, logger: LoggerConfig) -> Self {
        let router = Self::build_router(&config, logger);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, logger: LoggerConfig) -> Router {
        Router::new()
            .route("/", get(index))
            .route("/health", get(health))
            .route("/ping", get(ping))
            .route("/echo/{*path}", get(echo))
            .route("/fail", get(fail))
            .route("/panic", get(panic))
            .route("/slow", get(slow))
            .fallback(not_found)
            .layer(CatchPanicLayer::new())
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(RequestLoggerLayer::new(logger))
    }

    /// The configured router, for driving requests without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Run the server until `shutdown` fires or the process is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

async fn index() -> &'static str {
    "request-logger"
}

async fn health() -> &'static str {
    "healthy"
}

async fn ping() -> &'static str {
    "pong"
}

/// Echoes the path and the correlation id assigned by the logger.
async fn echo(Path(path): Path<String>, Extension(ctx): Extension<RequestContext>) -> String {
    format!("{} {}", ctx.id(), path)
}

/// Records handler errors, then fails with 502.
async fn fail(Extension(ctx): Extension<RequestContext>) -> impl IntoResponse {
    ctx.record_error("upstream connect refused");
    ctx.record_error("fallback exhausted");
    (StatusCode::BAD_GATEWAY, "upstream unavailable")
}

async fn panic() -> &'static str {
    panic!("handler panicked")
}

#[derive(Debug, Deserialize)]
struct SlowParams {
    #[serde(default)]
    ms: u64,
}

async fn slow(Query(params): Query<SlowParams>) -> String {
    tokio::time::sleep(Duration::from_millis(params.ms)).await;
    format!("slept {}ms", params.ms)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "not found")
}
