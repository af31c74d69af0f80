// Endpoint normalization.
//
// Callers may hand us a bare host, a host:port, or a full URL with an
// http/https scheme. The scheme decides TLS; anything path-like after
// the authority is rejected rather than silently dropped.

use url::Url;

use crate::error::CoreError;

/// A normalized server endpoint: bare authority plus a TLS flag.
///
/// Invariant: `host` never contains a scheme or a `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub encrypted: bool,
}

impl Endpoint {
    /// Parse a user-supplied endpoint string.
    ///
    /// `https://` means TLS on, `http://` or no scheme means TLS off.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let (host, encrypted) = if let Some(rest) = raw.strip_prefix("https://") {
            (rest, true)
        } else if let Some(rest) = raw.strip_prefix("http://") {
            (rest, false)
        } else {
            (raw, false)
        };

        if host.is_empty() {
            return Err(CoreError::InvalidEndpoint {
                endpoint: raw.to_owned(),
                reason: "empty host".to_owned(),
            });
        }
        if host.contains('/') {
            return Err(CoreError::InvalidEndpoint {
                endpoint: raw.to_owned(),
                reason: "endpoint must not contain a path".to_owned(),
            });
        }

        Ok(Self {
            host: host.to_owned(),
            encrypted,
        })
    }

    /// Render back to a base URL for the API client.
    pub fn to_url(&self) -> Result<Url, CoreError> {
        let scheme = if self.encrypted { "https" } else { "http" };
        Url::parse(&format!("{scheme}://{}/", self.host)).map_err(|e| CoreError::InvalidEndpoint {
            endpoint: self.host.clone(),
            reason: e.to_string(),
        })
    }
}
