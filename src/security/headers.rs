//! Header manipulation for forwarded requests.
//!
//! # Responsibilities
//! - Replace client credentials with the gateway's bearer token
//! - Pin the Host header to the upstream authority
//! - Add X-Forwarded-For
//! - Strip hop-by-hop headers
//!
//! # Design Decisions
//! - Client-supplied Authorization is never forwarded, whatever its value
//! - End-to-end headers pass through untouched

use std::net::IpAddr;

use axum::http::header::{self, HeaderMap, HeaderName, HeaderValue};

pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Headers that only apply to a single connection (RFC 9110 §7.6.1).
const HOP_BY_HOP: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-connection",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Drop every `Authorization` header and insert exactly one with `bearer`.
pub fn replace_authorization(headers: &mut HeaderMap, bearer: &HeaderValue) {
    headers.remove(header::AUTHORIZATION);
    headers.insert(header::AUTHORIZATION, bearer.clone());
}

/// Set `Host` to the upstream authority, overriding what the client sent.
pub fn set_host(headers: &mut HeaderMap, authority: &str) -> Result<(), header::InvalidHeaderValue> {
    headers.insert(header::HOST, HeaderValue::from_str(authority)?);
    Ok(())
}

/// Remove hop-by-hop headers, including any listed in `Connection`.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let listed: Vec<HeaderName> = headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .filter_map(|name| HeaderName::from_bytes(name.trim().as_bytes()).ok())
        .collect();

    for name in listed {
        headers.remove(name);
    }
    for name in HOP_BY_HOP {
        headers.remove(name);
    }
}

/// Append the client IP to `X-Forwarded-For`, folding prior values into one.
pub fn append_forwarded_for(headers: &mut HeaderMap, client: IpAddr) {
    let prior: Vec<&str> = headers
        .get_all(&X_FORWARDED_FOR)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();

    let value = if prior.is_empty() {
        client.to_string()
    } else {
        format!("{}, {}", prior.join(", "), client)
    };

    if let Ok(value) = HeaderValue::from_str(&value) {
        headers.insert(X_FORWARDED_FOR, value);
    }
}
