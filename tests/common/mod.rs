//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Json};
use axum::Router;
use futures_util::stream::{self, StreamExt};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use upload_gateway::config::{GatewayConfig, StorageToken};
use upload_gateway::{GatewayServer, Shutdown};

pub const TOKEN: &str = "gateway-secret-token";

fn header_values(headers: &HeaderMap, name: &str) -> Vec<String> {
    headers
        .get_all(name)
        .iter()
        .map(|v| v.to_str().unwrap_or_default().to_string())
        .collect()
}

async fn echo(request: Request<Body>) -> Json<Value> {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

    Json(json!({
        "method": parts.method.as_str(),
        "path": parts.uri.path(),
        "query": parts.uri.query(),
        "host": header_values(&parts.headers, "host"),
        "authorization": header_values(&parts.headers, "authorization"),
        "x_forwarded_for": header_values(&parts.headers, "x-forwarded-for"),
        "x_upload_id": header_values(&parts.headers, "x-upload-id"),
        "content_type": header_values(&parts.headers, "content-type"),
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Upstream that answers every request with a JSON description of it.
pub async fn start_echo_upstream() -> SocketAddr {
    serve(Router::new().fallback(echo)).await
}

/// Upstream that answers every request with a fixed status and body.
pub async fn start_fixed_upstream(status: u16, body: &'static str) -> SocketAddr {
    let status = StatusCode::from_u16(status).unwrap();
    serve(Router::new().fallback(move || async move {
        (status, [("x-upstream", "fixed")], body).into_response()
    }))
    .await
}

/// Upstream that waits before answering.
pub async fn start_slow_upstream(delay: Duration) -> SocketAddr {
    serve(Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        "late"
    }))
    .await
}

/// Upstream that answers as soon as the first body chunk arrives, without
/// waiting for the rest of the upload.
pub async fn start_first_chunk_upstream() -> SocketAddr {
    serve(Router::new().fallback(|request: Request<Body>| async move {
        let mut body = request.into_body().into_data_stream();
        match body.next().await {
            Some(Ok(chunk)) => format!("first={}", String::from_utf8_lossy(&chunk)),
            _ => "first=".to_string(),
        }
    }))
    .await
}

/// Upstream whose response body sends `first` right away and then stalls
/// for `hold` before finishing.
pub async fn start_stalling_upstream(first: &'static str, hold: Duration) -> SocketAddr {
    serve(Router::new().fallback(move || async move {
        let head = stream::once(async move { Ok::<_, Infallible>(Bytes::from_static(first.as_bytes())) });
        let tail = stream::once(async move {
            tokio::time::sleep(hold).await;
            Ok::<_, Infallible>(Bytes::from_static(b"-rest"))
        });
        Body::from_stream(head.chain(tail))
    }))
    .await
}

/// A local port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// A fresh static bundle: index, one script, one nested page.
pub fn temp_assets() -> PathBuf {
    let root = std::env::temp_dir().join(format!("upload-gateway-it-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(root.join("about")).unwrap();
    std::fs::write(root.join("index.html"), "<html>front-end</html>").unwrap();
    std::fs::write(root.join("app.js"), "console.log('app')").unwrap();
    std::fs::write(root.join("about/index.html"), "<html>about</html>").unwrap();
    root
}

pub fn gateway_config(upstream_url: &str) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.url = upstream_url.to_string();
    config.upstream.storage_token = Some(StorageToken::new(TOKEN));
    config.assets.root = temp_assets();
    config
}

/// Start the gateway on an ephemeral port. Call `trigger` on the returned
/// handle to stop it.
pub async fn start_gateway(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let server = GatewayServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .unwrap()
}
