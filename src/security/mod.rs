//! Security subsystem.
//!
//! # Responsibilities
//! - Keep client credentials from reaching the upstream
//! - Keep connection-scoped headers from crossing the proxy

pub mod headers;
