//! Upload gateway library.
//!
//! Serves a static front-end and forwards `POST /upload` to a storage API,
//! replacing the client's credentials with the gateway's own token.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;
pub mod security;

pub use config::schema::GatewayConfig;
pub use http::GatewayServer;
pub use lifecycle::Shutdown;
