//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Require the storage token before anything is served
//! - Check the upstream URL and listener addresses parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::GatewayConfig;
use crate::proxy::target::{TargetError, UpstreamTarget};

/// A single semantic problem with the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("storage token is not set (use --storage-token or NFTJR_STORAGE_TOKEN)")]
    MissingToken,

    #[error("storage token is empty")]
    EmptyToken,

    #[error("storage token contains characters not allowed in an HTTP header")]
    InvalidToken,

    #[error("upstream url: {0}")]
    Upstream(#[from] TargetError),

    #[error("invalid {field} '{value}': {reason}")]
    Address {
        field: &'static str,
        value: String,
        reason: std::net::AddrParseError,
    },

    #[error("{0} must be greater than zero")]
    ZeroTimeout(&'static str),
}

/// Check the configuration for semantic errors.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match &config.upstream.storage_token {
        None => errors.push(ValidationError::MissingToken),
        Some(token) if token.is_blank() => errors.push(ValidationError::EmptyToken),
        Some(token) if token.bearer().is_err() => errors.push(ValidationError::InvalidToken),
        Some(_) => {}
    }

    if let Err(e) = UpstreamTarget::parse(&config.upstream.url) {
        errors.push(e.into());
    }

    if let Err(reason) = config.listener.bind_address.parse::<SocketAddr>() {
        errors.push(ValidationError::Address {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
            reason,
        });
    }

    if config.observability.metrics_enabled {
        if let Err(reason) = config.observability.metrics_address.parse::<SocketAddr>() {
            errors.push(ValidationError::Address {
                field: "observability.metrics_address",
                value: config.observability.metrics_address.clone(),
                reason,
            });
        }
    }

    if config.upstream.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("upstream.timeout_secs"));
    }
    if config.upstream.connect_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout("upstream.connect_timeout_secs"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
