use thiserror::Error;

/// Structured error code carried in an admin API error body.
///
/// MinIO reports "resource does not exist" with a dedicated code per
/// resource type. Decoding it here means callers compare enum variants
/// instead of matching on message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCode {
    NoSuchUser,
    NoSuchGroup,
    NoSuchPolicy,
    /// Any other code the server reports, verbatim.
    Other(String),
}

impl From<&str> for AdminCode {
    fn from(code: &str) -> Self {
        match code {
            "XMinioAdminNoSuchUser" => Self::NoSuchUser,
            "XMinioAdminNoSuchGroup" => Self::NoSuchGroup,
            "XMinioAdminNoSuchPolicy" => Self::NoSuchPolicy,
            other => Self::Other(other.to_owned()),
        }
    }
}

/// Top-level error type for the `miosync-api` crate.
///
/// Covers transport failures, admin API errors (with their structured
/// code), and S3 errors from the object-lock endpoint. `miosync-core`
/// maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Admin API ───────────────────────────────────────────────────
    /// Error response from the admin API, decoded from its body.
    #[error("Admin API error (HTTP {status}): {message}")]
    Admin {
        message: String,
        code: Option<AdminCode>,
        status: u16,
    },

    // ── S3 API ──────────────────────────────────────────────────────
    /// Error response from the S3 API (object-lock endpoint).
    #[error("S3 API error (HTTP {status}): {message}")]
    S3 { message: String, status: u16 },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// The structured admin error code, if this is an admin API error.
    pub fn admin_code(&self) -> Option<&AdminCode> {
        match self {
            Self::Admin { code, .. } => code.as_ref(),
            _ => None,
        }
    }
}
