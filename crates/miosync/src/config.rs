//! CLI-side configuration resolution.
//!
//! Bridges the TOML profiles in `miosync-config` with the global CLI
//! flags: flags win over environment, environment wins over the
//! profile. The result is a ready-to-connect `ServerConfig`.

use std::time::Duration;

use secrecy::SecretString;

use miosync_config as cfg;
use miosync_core::{Endpoint, ServerConfig};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &cfg::Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ServerConfig` from the config file, profile, and CLI overrides.
pub fn resolve_server_config(global: &GlobalOpts) -> Result<ServerConfig, CliError> {
    let config = cfg::load_config_or_default();
    let profile_name = active_profile_name(global, &config);

    if let Some(profile) = config.profiles.get(&profile_name) {
        return resolve_with_profile(profile, &profile_name, global);
    }

    // The user asked for a specific profile that does not exist.
    if global.profile.is_some() {
        let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
        available.sort_unstable();
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available.join(", "),
        });
    }

    // No profile -- build from CLI flags / env vars alone.
    resolve_from_flags(global, &profile_name)
}

fn resolve_with_profile(
    profile: &cfg::Profile,
    profile_name: &str,
    global: &GlobalOpts,
) -> Result<ServerConfig, CliError> {
    let endpoint_str = global.endpoint.as_deref().unwrap_or(&profile.endpoint);
    let endpoint = Endpoint::parse(endpoint_str).map_err(CliError::from)?;

    let access_key = global
        .access_key
        .clone()
        .unwrap_or_else(|| profile.access_key.clone());

    // Flag (or MIOSYNC_SECRET_KEY via clap env) wins over the profile's
    // credential chain.
    let secret_key = match &global.secret_key {
        Some(key) => SecretString::from(key.clone()),
        None => cfg::resolve_secret_key(profile, profile_name)?,
    };

    Ok(ServerConfig {
        endpoint,
        access_key,
        secret_key,
        cert_check: profile.cert_check && !global.insecure,
        ca_cert: profile.ca_cert.clone(),
        timeout: Duration::from_secs(global.timeout),
    })
}

fn resolve_from_flags(global: &GlobalOpts, profile_name: &str) -> Result<ServerConfig, CliError> {
    let endpoint_str = global.endpoint.as_deref().ok_or_else(|| CliError::NoConfig {
        path: cfg::config_path().display().to_string(),
    })?;
    let endpoint = Endpoint::parse(endpoint_str).map_err(CliError::from)?;

    let access_key = global.access_key.clone().ok_or_else(|| CliError::NoCredentials {
        profile: profile_name.to_owned(),
    })?;
    let secret_key = global
        .secret_key
        .clone()
        .map(SecretString::from)
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.to_owned(),
        })?;

    Ok(ServerConfig {
        endpoint,
        access_key,
        secret_key,
        cert_check: !global.insecure,
        ca_cert: None,
        timeout: Duration::from_secs(global.timeout),
    })
}
