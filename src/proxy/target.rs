//! The fixed upstream the upload route forwards to.

use std::fmt;

use axum::http::Uri;
use thiserror::Error;
use url::Url;

/// Why an upstream URL was rejected.
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid url: {0}")]
    Parse(#[from] url::ParseError),

    #[error("unsupported scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    #[error("url has no host")]
    MissingHost,
}

/// A validated absolute upstream URL (scheme, host, base path).
#[derive(Debug, Clone)]
pub struct UpstreamTarget {
    url: Url,
    authority: String,
}

impl UpstreamTarget {
    /// Parse and validate an upstream URL.
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let url = Url::parse(raw)?;

        match url.scheme() {
            "http" | "https" => {}
            other => return Err(TargetError::UnsupportedScheme(other.to_string())),
        }

        let host = url.host_str().ok_or(TargetError::MissingHost)?;
        let authority = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };

        Ok(Self { url, authority })
    }

    /// Host plus any non-default port, as sent in the `Host` header.
    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// Base path every forwarded path is appended to.
    pub fn base_path(&self) -> &str {
        self.url.path()
    }

    /// Build the outbound URI for an inbound request URI.
    ///
    /// The inbound path is appended to the base path with a single joining
    /// slash; a base query and the inbound query are joined with `&`.
    pub fn forward_uri(&self, inbound: &Uri) -> Result<Uri, axum::http::Error> {
        let path = join_paths(self.base_path(), inbound.path());

        let base_query = self.url.query().filter(|q| !q.is_empty());
        let inbound_query = inbound.query().filter(|q| !q.is_empty());
        let path_and_query = match (base_query, inbound_query) {
            (Some(base), Some(extra)) => format!("{path}?{base}&{extra}"),
            (Some(query), None) | (None, Some(query)) => format!("{path}?{query}"),
            (None, None) => path,
        };

        Uri::builder()
            .scheme(self.scheme())
            .authority(self.authority())
            .path_and_query(path_and_query)
            .build()
    }
}

impl fmt::Display for UpstreamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

fn join_paths(base: &str, path: &str) -> String {
    match (base.ends_with('/'), path.starts_with('/')) {
        (true, true) => format!("{}{}", base, &path[1..]),
        (false, false) => format!("{base}/{path}"),
        _ => format!("{base}{path}"),
    }
}
