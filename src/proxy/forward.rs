//! Credential-substituting forwarder.
//!
//! # Responsibilities
//! - Rebuild the inbound request against the upstream target
//! - Swap the client's Authorization for the gateway's bearer token
//! - Send it once and hand back the upstream response unbuffered
//! - Classify transport failures
//!
//! # Design Decisions
//! - Stateless per request; the target and token are fixed at construction
//! - The request body is streamed to the upstream as it arrives
//! - Upstream error statuses are responses, not errors
//! - No retries

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header::InvalidHeaderValue, HeaderValue, Request, Response, Version};
use hyper::body::Incoming;

use crate::config::StorageToken;
use crate::proxy::client::UpstreamClient;
use crate::proxy::error::ProxyError;
use crate::proxy::target::UpstreamTarget;
use crate::security::headers;

/// Forwards upload requests to one fixed upstream with a fixed credential.
pub struct ProxyHandler {
    client: UpstreamClient,
    target: UpstreamTarget,
    bearer: HeaderValue,
    timeout: Option<Duration>,
}

impl ProxyHandler {
    /// Fails only if the token cannot be carried in a header, which config
    /// validation already rejects.
    pub fn new(
        client: UpstreamClient,
        target: UpstreamTarget,
        token: &StorageToken,
        timeout: Option<Duration>,
    ) -> Result<Self, InvalidHeaderValue> {
        Ok(Self {
            client,
            target,
            bearer: token.bearer()?,
            timeout,
        })
    }

    pub fn target(&self) -> &UpstreamTarget {
        &self.target
    }

    /// Turn an inbound request into the outbound one.
    pub fn rewrite(
        &self,
        request: Request<Body>,
        client_addr: Option<SocketAddr>,
    ) -> Result<Request<Body>, ProxyError> {
        let (mut parts, body) = request.into_parts();

        parts.uri = self
            .target
            .forward_uri(&parts.uri)
            .map_err(|e| ProxyError::Rewrite(e.to_string()))?;
        parts.version = Version::HTTP_11;
        parts.extensions.clear();

        headers::strip_hop_by_hop(&mut parts.headers);
        headers::set_host(&mut parts.headers, self.target.authority())
            .map_err(|e| ProxyError::Rewrite(e.to_string()))?;
        headers::replace_authorization(&mut parts.headers, &self.bearer);
        if let Some(addr) = client_addr {
            headers::append_forwarded_for(&mut parts.headers, addr.ip());
        }

        Ok(Request::from_parts(parts, body))
    }

    /// Forward one request and return the upstream response as received.
    ///
    /// The timeout, when set, bounds the wait for the response head; the
    /// body streams afterwards without a limit.
    pub async fn forward(
        &self,
        request: Request<Body>,
        client_addr: Option<SocketAddr>,
    ) -> Result<Response<Incoming>, ProxyError> {
        let outbound = self.rewrite(request, client_addr)?;

        tracing::debug!(
            method = %outbound.method(),
            uri = %outbound.uri(),
            "Forwarding to upstream"
        );

        let pending = self.client.request(outbound);
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| ProxyError::TimedOut {
                    target: self.target.to_string(),
                    after: limit,
                })?,
            None => pending.await,
        };

        let mut response = result.map_err(|e| ProxyError::unreachable(&self.target, &e))?;
        headers::strip_hop_by_hop(response.headers_mut());
        Ok(response)
    }
}
