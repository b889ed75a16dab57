//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::Deserialize;

use crate::config::secret::StorageToken;

/// Storage API the upload route forwards to.
pub const DEFAULT_UPSTREAM_URL: &str = "https://nft.storage/api";

/// Root configuration for the upload gateway.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream storage API and the credential used against it.
    pub upstream: UpstreamConfig,

    /// Static front-end bundle.
    pub assets: AssetsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8090").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8090".to_string(),
        }
    }
}

/// Upstream configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Absolute URL of the storage API (scheme, host, base path).
    pub url: String,

    /// Secret bearer token sent upstream in place of the client's credentials.
    pub storage_token: Option<StorageToken>,

    /// Upper bound on one upstream round trip. Unset means no limit.
    pub timeout_secs: Option<u64>,

    /// Upper bound on establishing the upstream connection.
    pub connect_timeout_secs: Option<u64>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_string(),
            storage_token: None,
            timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

/// Static asset configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Directory holding the built front-end.
    pub root: PathBuf,

    /// Document served for directories and unknown paths.
    pub index: String,
}

impl AssetsConfig {
    /// Full path of the fallback document.
    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index)
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("../frontend/dist"),
            index: "index.html".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable, for development.
    #[default]
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
