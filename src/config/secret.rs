//! The storage API credential.

use std::fmt;

use axum::http::header::{HeaderValue, InvalidHeaderValue};
use serde::Deserialize;

/// Secret bearer token for the storage API.
///
/// `Debug` and `Display` never print the value.
#[derive(Clone, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct StorageToken(String);

impl StorageToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value. Only for building the outbound credential.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// `Authorization` header value `Bearer <token>`, marked sensitive so
    /// the HTTP stack never renders it in debug output.
    pub fn bearer(&self) -> Result<HeaderValue, InvalidHeaderValue> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", self.0))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for StorageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StorageToken(<redacted>)")
    }
}

impl fmt::Display for StorageToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<redacted>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let token = StorageToken::new("s3cr3t");
        assert!(!format!("{:?}", token).contains("s3cr3t"));
        assert!(!token.to_string().contains("s3cr3t"));
    }

    #[test]
    fn test_bearer_value() {
        let value = StorageToken::new("s3cr3t").bearer().unwrap();
        assert_eq!(value.to_str().unwrap(), "Bearer s3cr3t");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_bearer_rejects_control_chars() {
        assert!(StorageToken::new("bad\ntoken").bearer().is_err());
    }

    #[test]
    fn test_blank() {
        assert!(StorageToken::new("  ").is_blank());
        assert!(!StorageToken::new("x").is_blank());
    }
}
