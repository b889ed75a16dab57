//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Handlers and lifecycle produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → stdout (pretty or JSON)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID is a field on every upload log line
//! - The storage token is never a field

pub mod logging;
pub mod metrics;
