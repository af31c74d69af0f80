use thiserror::Error;

use crate::outcome::Outcome;

/// Top-level error type for the `miosync-core` crate.
///
/// Fetch and apply failures keep the `miosync_api::Error` as their
/// source so the CLI can surface the server's own message.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Validation ──────────────────────────────────────────────────
    /// The endpoint string could not be normalized.
    #[error("invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    /// A resource specification is incomplete or inconsistent.
    #[error("invalid specification: {0}")]
    InvalidSpec(String),

    // ── Connection ──────────────────────────────────────────────────
    /// Building the API client failed (TLS setup, bad URL).
    #[error("failed to connect: {0}")]
    Connect(#[source] miosync_api::Error),

    // ── Reconciliation ──────────────────────────────────────────────
    /// Reading current server state failed.
    #[error("failed to fetch {resource}: {source}")]
    Fetch {
        resource: String,
        #[source]
        source: miosync_api::Error,
    },

    /// A planned mutation failed mid-apply. Carries the outcome that
    /// was computed before applying, so callers can still report what
    /// the run intended to do.
    #[error("{operation} failed for {resource}: {source}")]
    Apply {
        operation: String,
        resource: String,
        outcome: Box<Outcome>,
        #[source]
        source: miosync_api::Error,
    },
}
