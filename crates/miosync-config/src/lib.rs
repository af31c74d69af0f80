//! Configuration for the miosync CLI.
//!
//! TOML profiles, secret-key resolution (env + keyring + plaintext),
//! and translation to `miosync_core::ServerConfig`.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use miosync_core::{Endpoint, ServerConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no secret key configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "text".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named server profile.
#[derive(Debug, Deserialize, Serialize)]
pub struct Profile {
    /// Server endpoint: bare host:port, or a URL whose https/http
    /// scheme selects TLS.
    pub endpoint: String,

    /// Admin access key.
    pub access_key: String,

    /// Secret key (plaintext; prefer keyring or env var).
    pub secret_key: Option<String>,

    /// Environment variable name containing the secret key.
    pub secret_key_env: Option<String>,

    /// Verify the server certificate.
    #[serde(default = "default_cert_check")]
    pub cert_check: bool,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,
}

fn default_cert_check() -> bool {
    true
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "miosync", "miosync").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("miosync");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("MIOSYNC_CFG_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve a secret key from the credential chain.
///
/// Order: profile's `secret_key_env` var, then `MIOSYNC_SECRET_KEY`,
/// then the system keyring, then plaintext in the config file.
pub fn resolve_secret_key(
    profile: &Profile,
    profile_name: &str,
) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.secret_key_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Ok(val) = std::env::var("MIOSYNC_SECRET_KEY") {
        return Ok(SecretString::from(val));
    }

    if let Ok(entry) = keyring::Entry::new("miosync", &format!("{profile_name}/secret-key")) {
        if let Ok(secret) = entry.get_password() {
            return Ok(SecretString::from(secret));
        }
    }

    if let Some(ref key) = profile.secret_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Store a secret key in the system keyring.
pub fn store_secret_key(profile_name: &str, secret: &str) -> Result<(), ConfigError> {
    let entry = keyring::Entry::new("miosync", &format!("{profile_name}/secret-key")).map_err(
        |e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        },
    )?;
    entry.set_password(secret).map_err(|e| ConfigError::Validation {
        field: "keyring".into(),
        reason: e.to_string(),
    })
}

// ── Profile translation ─────────────────────────────────────────────

/// Build a `ServerConfig` from a profile, without CLI flag overrides.
pub fn profile_to_server_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ServerConfig, ConfigError> {
    let endpoint =
        Endpoint::parse(&profile.endpoint).map_err(|e| ConfigError::Validation {
            field: "endpoint".into(),
            reason: e.to_string(),
        })?;

    let secret_key = resolve_secret_key(profile, profile_name)?;
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(ServerConfig {
        endpoint,
        access_key: profile.access_key.clone(),
        secret_key,
        cert_check: profile.cert_check,
        ca_cert: profile.ca_cert.clone(),
        timeout,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::*;

    fn profile(secret: Option<&str>) -> Profile {
        Profile {
            endpoint: "https://minio.example.com:9000".into(),
            access_key: "minio".into(),
            secret_key: secret.map(str::to_owned),
            secret_key_env: None,
            cert_check: true,
            ca_cert: None,
            timeout: None,
        }
    }

    #[test]
    fn defaults_are_sensible() {
        let cfg = Config::default();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.output, "text");
        assert_eq!(cfg.defaults.timeout, 30);
    }

    #[test]
    fn profile_round_trips_through_toml() {
        let mut cfg = Config::default();
        cfg.profiles.insert("prod".into(), profile(Some("minio123")));

        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        let p = &parsed.profiles["prod"];
        assert_eq!(p.endpoint, "https://minio.example.com:9000");
        assert!(p.cert_check);
    }

    #[test]
    fn cert_check_defaults_to_true_when_omitted() {
        let parsed: Config = toml::from_str(
            r#"
            [profiles.prod]
            endpoint = "minio.example.com:9000"
            access_key = "minio"
            "#,
        )
        .unwrap();
        assert!(parsed.profiles["prod"].cert_check);
    }

    #[test]
    fn plaintext_secret_key_resolves() {
        let p = profile(Some("minio123"));
        let secret = resolve_secret_key(&p, "prod").unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(&secret), "minio123");
    }

    #[test]
    fn missing_secret_key_is_an_error() {
        let p = profile(None);
        let err = resolve_secret_key(&p, "prod").unwrap_err();
        assert!(matches!(err, ConfigError::NoCredentials { .. }));
    }

    #[test]
    fn server_config_rejects_endpoint_with_path() {
        let mut p = profile(Some("minio123"));
        p.endpoint = "https://minio.example.com/console".into();
        let err = profile_to_server_config(&p, "prod", &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }
}
