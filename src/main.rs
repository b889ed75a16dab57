//! Upload gateway.
//!
//! ```text
//!     Browser ──GET /*──────────▶ static bundle (SPA fallback)
//!        │
//!        └──POST /upload──▶ proxy ──Authorization: Bearer <token>──▶ storage API
//! ```

use std::path::PathBuf;

use clap::Parser;

use upload_gateway::config::loader::read_config;
use upload_gateway::config::{ConfigError, GatewayConfig, StorageToken};
use upload_gateway::lifecycle::{bootstrap, Shutdown};
use upload_gateway::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "upload-gateway")]
#[command(about = "Static front-end server with a credential-substituting upload proxy", long_about = None)]
struct Cli {
    /// TOML configuration file. Flags and environment override its values.
    #[arg(short, long, env = "UPLOAD_GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Bearer token for the storage API.
    #[arg(long, env = "NFTJR_STORAGE_TOKEN", hide_env_values = true)]
    storage_token: Option<String>,

    /// Listen address, e.g. 0.0.0.0:8090.
    #[arg(long)]
    bind_address: Option<String>,

    /// Storage API base URL.
    #[arg(long)]
    upstream_url: Option<String>,

    /// Directory holding the built front-end.
    #[arg(long)]
    static_root: Option<PathBuf>,

    /// Upper bound on one upstream round trip, in seconds.
    #[arg(long)]
    upstream_timeout_secs: Option<u64>,
}

impl Cli {
    /// Defaults, then the config file, then flags and environment.
    fn into_config(self) -> Result<GatewayConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => GatewayConfig::default(),
        };

        if let Some(token) = self.storage_token {
            config.upstream.storage_token = Some(StorageToken::new(token));
        }
        if let Some(bind_address) = self.bind_address {
            config.listener.bind_address = bind_address;
        }
        if let Some(url) = self.upstream_url {
            config.upstream.url = url;
        }
        if let Some(root) = self.static_root {
            config.assets.root = root;
        }
        if let Some(secs) = self.upstream_timeout_secs {
            config.upstream.timeout_secs = Some(secs);
        }

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    init_logging(&config.observability);
    tracing::info!("upload-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let (server, listener) = match bootstrap(config).await {
        Ok(ready) => ready,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
