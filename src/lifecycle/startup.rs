//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the server, which validates configuration
//! - Initialize subsystems in dependency order
//! - Bind the listener last
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - No connection is accepted until everything above succeeded

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ConfigError, GatewayConfig};
use crate::http::GatewayServer;
use crate::observability::metrics;

/// Fatal startup failure.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Build the server, start metrics, then bind.
///
/// `GatewayServer::new` validates the configuration, so nothing listens,
/// the metrics endpoint included, until the configuration is known good.
pub async fn bootstrap(config: GatewayConfig) -> Result<(GatewayServer, TcpListener), StartupError> {
    let bind_address = config.listener.bind_address.clone();
    let observability = config.observability.clone();

    tracing::info!(
        bind_address = %bind_address,
        upstream = %config.upstream.url,
        upstream_timeout_secs = ?config.upstream.timeout_secs,
        assets = %config.assets.root.display(),
        "Configuration loaded"
    );

    let server = GatewayServer::new(config)?;

    if observability.metrics_enabled {
        if let Ok(addr) = observability.metrics_address.parse::<SocketAddr>() {
            metrics::init_metrics(addr)?;
        }
    }

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: bind_address.clone(),
            source,
        })?;

    let local_addr = listener.local_addr().map_err(|source| StartupError::Bind {
        address: bind_address,
        source,
    })?;
    tracing::info!(address = %local_addr, "Listening for connections");

    Ok((server, listener))
}
