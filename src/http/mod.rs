//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → POST /upload → proxy handler → upstream
//!     → anything else → assets.rs (static bundle, SPA fallback)
//!     → Send to client
//! ```

pub mod assets;
pub mod request;
pub mod server;

pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::GatewayServer;
