//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → loader.rs (optional TOML file)
//!     → CLI flags / environment (applied by the binary)
//!     → validation.rs (semantic checks)
//!     → GatewayConfig (validated, immutable)
//!     → injected into the proxy handler at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults except the storage token
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod secret;
pub mod validation;

pub use loader::ConfigError;
pub use schema::{AssetsConfig, GatewayConfig, ListenerConfig, LogFormat, ObservabilityConfig, UpstreamConfig};
pub use secret::StorageToken;
