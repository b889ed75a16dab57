//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the upload route and the asset fallback
//! - Wire up middleware (request ID, tracing)
//! - Bind server to listener with client addresses available to handlers
//! - Forward uploads through the proxy handler
//! - Stop gracefully on shutdown

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::Request,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::validation::{validate_config, ValidationError};
use crate::config::{ConfigError, GatewayConfig};
use crate::http::assets::asset_service;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer, RequestIdExt};
use crate::lifecycle::startup::StartupError;
use crate::observability::metrics;
use crate::proxy::{build_client, ProxyHandler, UpstreamTarget};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub proxy: Arc<ProxyHandler>,
}

/// HTTP server for the upload gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new server. The configuration is validated here as well, so
    /// a server can never exist without a token and a parsed upstream.
    pub fn new(config: GatewayConfig) -> Result<Self, StartupError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let token = config
            .upstream
            .storage_token
            .as_ref()
            .ok_or_else(|| ConfigError::Validation(vec![ValidationError::MissingToken]))?;
        let target = UpstreamTarget::parse(&config.upstream.url)
            .map_err(|e| ConfigError::Validation(vec![e.into()]))?;

        let client = build_client(config.upstream.connect_timeout_secs.map(Duration::from_secs));
        let proxy = ProxyHandler::new(
            client,
            target,
            token,
            config.upstream.timeout_secs.map(Duration::from_secs),
        )
        .map_err(|_| ConfigError::Validation(vec![ValidationError::InvalidToken]))?;

        let state = AppState {
            proxy: Arc::new(proxy),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/upload", post(upload_handler))
            .fallback_service(asset_service(&config.assets))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(set_request_id_layer())
                    .layer(TraceLayer::new_for_http())
                    .layer(propagate_request_id_layer()),
            )
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.url,
            assets = %self.config.assets.root.display(),
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The router without a listener, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }
}

/// Upload handler: forwards the request with the gateway's credentials.
async fn upload_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request.request_id().to_string();
    let client_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);

    match client_addr {
        Some(addr) => tracing::info!(request_id = %request_id, client = %addr, "Uploaded a file"),
        None => tracing::info!(request_id = %request_id, "Uploaded a file from unknown client"),
    }

    match state.proxy.forward(request, client_addr).await {
        Ok(response) => {
            let status = response.status();
            metrics::record_upload("forwarded", status.as_u16(), start_time);
            tracing::debug!(request_id = %request_id, status = %status, "Upstream responded");

            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body))
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                upstream = %state.proxy.target(),
                error = %e,
                "Upload not forwarded"
            );
            metrics::record_upload(e.kind(), e.status().as_u16(), start_time);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageToken;
    use axum::http::{Method, StatusCode};
    use tower::ServiceExt;

    fn config() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.upstream.storage_token = Some(StorageToken::new("token"));
        config.assets.root = std::env::temp_dir().join("upload-gateway-no-assets");
        config
    }

    #[test]
    fn test_new_requires_token() {
        let mut config = config();
        config.upstream.storage_token = None;
        let err = GatewayServer::new(config).err().unwrap();
        assert!(matches!(err, StartupError::Config(ConfigError::Validation(_))));
    }

    #[test]
    fn test_new_rejects_bad_upstream() {
        let mut config = config();
        config.upstream.url = "::not a url::".to_string();
        assert!(GatewayServer::new(config).is_err());
    }

    #[tokio::test]
    async fn test_get_upload_is_method_not_allowed() {
        let server = GatewayServer::new(config()).unwrap();
        let request = Request::builder()
            .method(Method::GET)
            .uri("/upload")
            .body(Body::empty())
            .unwrap();

        let response = server.router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
