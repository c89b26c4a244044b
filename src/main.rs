//! request-logger demo service.
//!
//! Hosts a handful of routes behind the request logger so its records can be
//! watched end to end:
//!
//! ```text
//! request-logger --config request-logger.toml
//! curl localhost:8080/fail      # error summary with two handler errors
//! curl localhost:8080/ping      # debug "check detected" only, if configured
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use request_logger::config::{load_config, ServiceConfig};
use request_logger::observability::logging;
use request_logger::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "request-logger")]
#[command(about = "Demo HTTP service with per-request logging", long_about = None)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind.to_string();
    }

    logging::init(&config.observability)?;

    tracing::info!("request-logger v{} starting", env!("CARGO_PKG_VERSION"));

    let logger = config.logger.build()?;
    tracing::info!(
        bind_address = %config.listener.bind_address,
        skip_paths = config.logger.skip_paths.len(),
        check_paths = config.logger.check_paths.len(),
        use_utc = config.logger.use_utc,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, logger);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
