//! Dashboard server.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌──────────────────────────────────────────────┐
//!                          │                  DASHBOARD                   │
//!     Client Request       │  ┌─────────┐    ┌──────────┐                 │
//!     ─────────────────────┼─▶│  http   │───▶│ routing  │──── no match ──┐│
//!                          │  │ server  │    │ prefixes │                ││
//!                          │  └─────────┘    └────┬─────┘                ▼│
//!                          │                      │ match        ┌────────┐
//!                          │                      ▼              │ static │
//!     Client Response      │               ┌────────────┐        │ files  │
//!     ◀────────────────────┼───────────────│   proxy    │◀───────┼────────┼── Upstream
//!                          │               │  forward   │        └────────┘   service
//!                          │               └────────────┘                 │
//!                          └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use dashboard_proxy::config::{resolve_config, Overrides};
use dashboard_proxy::lifecycle::{signals, Shutdown};
use dashboard_proxy::observability::logging;
use dashboard_proxy::HttpServer;

#[derive(Parser)]
#[command(name = "dashboard-proxy")]
#[command(about = "Serves the dashboard and proxies /api/<service>/ to local services", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listening port (overrides the config file)
    #[arg(short, long)]
    port: Option<u16>,

    /// Directory served for non-proxied GET requests, relative to the
    /// working directory (a relative root in the config file is relative
    /// to that file)
    #[arg(long)]
    static_root: Option<String>,

    /// Host of the built-in service routes
    #[arg(long)]
    upstream_host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = Overrides {
        port: cli.port,
        static_root: cli.static_root,
        upstream_host: cli.upstream_host,
    };
    let config = resolve_config(cli.config.as_deref(), overrides)?;

    logging::init(&config.observability.log_level);
    tracing::info!("dashboard-proxy v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        static_root = %config.static_files.root,
        max_body_bytes = config.limits.max_body_bytes,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    let server = HttpServer::new(&config);
    logging::log_banner(&local_addr, server.mapping());

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
