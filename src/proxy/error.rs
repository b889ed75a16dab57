//! Classified forwarding failures and their client-visible responses.

use std::error::Error as StdError;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

/// Why a forwarded request produced no upstream response.
#[derive(Debug, Error)]
pub enum ProxyError {
    /// The upstream was not reached (DNS, refused, TLS, reset).
    #[error("remote {target} unreachable, could not forward: {reason}")]
    Unreachable { target: String, reason: String },

    /// The upstream round trip exceeded the configured limit.
    #[error("remote {target} unreachable, could not forward: timed out after {}s", .after.as_secs())]
    TimedOut { target: String, after: Duration },

    /// The outbound request could not be built.
    #[error("failed to build upstream request: {0}")]
    Rewrite(String),
}

impl ProxyError {
    pub fn unreachable(target: impl ToString, source: &(dyn StdError + 'static)) -> Self {
        Self::Unreachable {
            target: target.to_string(),
            reason: error_chain(source),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Unreachable { .. } | Self::TimedOut { .. } => StatusCode::BAD_GATEWAY,
            Self::Rewrite(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Unreachable { .. } => "unreachable",
            Self::TimedOut { .. } => "timeout",
            Self::Rewrite(_) => "internal",
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Rewrite(_) => "Internal Server Error".to_string(),
            _ => self.to_string(),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// Render an error and its sources as `outer: inner: root`.
///
/// The hyper client's top-level error is only a category ("client error
/// (Connect)"); the useful detail is further down the chain.
pub fn error_chain(error: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![error.to_string()];
    let mut current = error.source();
    while let Some(source) = current {
        let text = source.to_string();
        if !parts.iter().any(|p| p == &text) {
            parts.push(text);
        }
        current = source.source();
    }
    parts.join(": ")
}
