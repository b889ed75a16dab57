//! Upload forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! POST /upload
//!     → forward.rs (rewrite URI, Host, Authorization)
//!     → client.rs (pooled HTTPS client, one attempt)
//!     → upstream storage API
//!     → response streamed back, or error.rs maps the failure
//! ```

pub mod client;
pub mod error;
pub mod forward;
pub mod target;

pub use client::{build_client, UpstreamClient};
pub use error::ProxyError;
pub use forward::ProxyHandler;
pub use target::{TargetError, UpstreamTarget};
