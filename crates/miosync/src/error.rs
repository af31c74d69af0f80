//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable
//! help text.

use miette::Diagnostic;
use thiserror::Error;

use miosync_core::CoreError;

/// Exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const API: i32 = 4;
    pub const APPLY: i32 = 5;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ──────────────────────────────────────────────────
    #[error("Could not connect to server")]
    #[diagnostic(
        code(miosync::connection_failed),
        help(
            "Check that the server is running and the endpoint is reachable.\n\
             For self-signed certificates, use --insecure (-k) or set ca_cert in your profile."
        )
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    // ── Credentials ─────────────────────────────────────────────────
    #[error("No secret key configured for profile '{profile}'")]
    #[diagnostic(
        code(miosync::no_credentials),
        help(
            "Configure credentials with: miosync config init\n\
             Or set the MIOSYNC_SECRET_KEY environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Reconciliation ──────────────────────────────────────────────
    #[error("Failed to fetch {resource}: {message}")]
    #[diagnostic(code(miosync::fetch_failed))]
    FetchFailed { resource: String, message: String },

    #[error("Failed to {operation} for {resource}: {message}")]
    #[diagnostic(
        code(miosync::apply_failed),
        help("Earlier operations in the plan may already have been applied.\n{applied}")
    )]
    ApplyFailed {
        operation: String,
        resource: String,
        message: String,
        applied: String,
    },

    // ── Validation ──────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(miosync::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ───────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(miosync::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: miosync config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No server configured")]
    #[diagnostic(
        code(miosync::no_config),
        help(
            "Create a config file with: miosync config init\n\
             Or pass --endpoint, --access-key and --secret-key.\n\
             Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(miosync::config))]
    Config(Box<figment::Error>),

    // ── IO / Serialization ──────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON payload: {0}")]
    #[diagnostic(code(miosync::json), help("Check the JSON file contents and try again."))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::NoCredentials { .. } => exit_code::AUTH,
            Self::FetchFailed { .. } => exit_code::API,
            Self::ApplyFailed { .. } => exit_code::APPLY,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidEndpoint { endpoint, reason } => CliError::Validation {
                field: "endpoint".into(),
                reason: format!("'{endpoint}': {reason}"),
            },

            CoreError::InvalidSpec(message) => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Connect(source) => CliError::ConnectionFailed {
                source: source.into(),
            },

            CoreError::Fetch { resource, source } => CliError::FetchFailed {
                resource,
                message: source.to_string(),
            },

            CoreError::Apply {
                operation,
                resource,
                outcome,
                source,
            } => CliError::ApplyFailed {
                operation,
                resource,
                message: source.to_string(),
                applied: format!("Planned change: {}", outcome.message),
            },
        }
    }
}

impl From<miosync_config::ConfigError> for CliError {
    fn from(err: miosync_config::ConfigError) -> Self {
        match err {
            miosync_config::ConfigError::NoCredentials { profile } => {
                CliError::NoCredentials { profile }
            }
            miosync_config::ConfigError::Validation { field, reason } => {
                CliError::Validation { field, reason }
            }
            miosync_config::ConfigError::Figment(e) => CliError::Config(e),
            miosync_config::ConfigError::Io(e) => CliError::Io(e),
            miosync_config::ConfigError::Serialization(e) => CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            },
        }
    }
}
