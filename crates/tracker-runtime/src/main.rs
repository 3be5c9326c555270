//! # Feedback Tracker Runtime
//!
//! ## Startup Sequence
//!
//! 1. Load configuration from the environment
//! 2. Initialize logging (`RUST_LOG`, default `info`)
//! 3. Open storage and wire the subsystems
//! 4. Serve HTTP until Ctrl+C, then drain in-flight requests

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tracker_runtime::{TrackerConfig, TrackerContainer};

fn init_tracing(json: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    }
    .map_err(|e| anyhow::anyhow!(e))
    .context("Failed to install tracing subscriber")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("[runtime] shutdown signal received"),
        Err(e) => {
            error!(error = %e, "[runtime] cannot listen for Ctrl+C; running until killed");
            std::future::pending::<()>().await;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = TrackerConfig::from_env().context("Invalid configuration")?;
    init_tracing(config.log_json)?;

    info!("===========================================");
    info!("  Feedback Tracker v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!(
        storage = ?config.storage.backend,
        addr = %config.gateway.http_addr(),
        "[runtime] configuration loaded"
    );

    let container = TrackerContainer::new(config).context("Failed to initialize subsystems")?;
    let gateway = container.gateway().context("Failed to build HTTP gateway")?;

    gateway
        .serve(shutdown_signal())
        .await
        .context("HTTP server failed")?;

    info!("[runtime] stopped");
    Ok(())
}
