//! Pooled HTTP(S) client for the upstream.

use std::time::Duration;

use axum::body::Body;
use hyper_rustls::{HttpsConnector, HttpsConnectorBuilder};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};

/// Client used for every forwarded upload. Cloning shares the pool.
pub type UpstreamClient = Client<HttpsConnector<HttpConnector>, Body>;

/// Build the upstream client.
///
/// Plain `http` is accepted alongside `https` so a local upstream can be
/// used in development and tests.
pub fn build_client(connect_timeout: Option<Duration>) -> UpstreamClient {
    // Another crate in the graph may have enabled a second rustls backend.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let mut http = HttpConnector::new();
    http.enforce_http(false);
    http.set_connect_timeout(connect_timeout);

    let https = HttpsConnectorBuilder::new()
        .with_webpki_roots()
        .https_or_http()
        .enable_http1()
        .wrap_connector(http);

    Client::builder(TokioExecutor::new()).build(https)
}
