// Server connection settings, resolved from profile/flags by the CLI.

use std::path::PathBuf;
use std::time::Duration;

use miosync_api::{AdminClient, Credentials, TlsMode, TransportConfig};
use secrecy::SecretString;

use crate::endpoint::Endpoint;
use crate::error::CoreError;

/// Everything needed to open an authenticated admin connection.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub endpoint: Endpoint,
    pub access_key: String,
    pub secret_key: SecretString,
    /// Verify the server certificate (TLS endpoints only).
    pub cert_check: bool,
    /// Additional CA bundle to trust.
    pub ca_cert: Option<PathBuf>,
    pub timeout: Duration,
}

impl ServerConfig {
    /// Build an [`AdminClient`] for this server.
    pub fn connect(&self) -> Result<AdminClient, CoreError> {
        let url = self.endpoint.to_url()?;
        let tls = if !self.cert_check {
            TlsMode::DangerAcceptInvalid
        } else if let Some(path) = &self.ca_cert {
            TlsMode::CustomCa(path.clone())
        } else {
            TlsMode::System
        };
        let transport = TransportConfig {
            tls,
            timeout: self.timeout,
        };
        let credentials = Credentials::new(self.access_key.clone(), self.secret_key.clone());
        AdminClient::new(url, credentials, &transport).map_err(CoreError::Connect)
    }
}
