//! Config subcommand handlers.

use dialoguer::{Confirm, Input};

use miosync_config as cfg;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = cfg::config_path();
            eprintln!("miosync -- configuration wizard");
            eprintln!("Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let endpoint: String = Input::new()
                .with_prompt("Server endpoint (e.g. https://minio.example.com:9000)")
                .interact_text()
                .map_err(prompt_err)?;

            let access_key: String = Input::new()
                .with_prompt("Access key")
                .interact_text()
                .map_err(prompt_err)?;

            let secret = rpassword::prompt_password("Secret key (stored in system keyring): ")?;

            let mut config = cfg::load_config_or_default();
            config.profiles.insert(
                profile_name.clone(),
                cfg::Profile {
                    endpoint,
                    access_key,
                    secret_key: None,
                    secret_key_env: None,
                    cert_check: true,
                    ca_cert: None,
                    timeout: None,
                },
            );
            if config.default_profile.is_none() {
                config.default_profile = Some(profile_name.clone());
            }

            if let Err(e) = cfg::store_secret_key(&profile_name, &secret) {
                eprintln!("Keyring unavailable ({e}); store the secret in plaintext instead?");
                let plaintext = Confirm::new()
                    .with_prompt("Write secret_key to the config file")
                    .default(false)
                    .interact()
                    .map_err(prompt_err)?;
                if plaintext {
                    if let Some(profile) = config.profiles.get_mut(&profile_name) {
                        profile.secret_key = Some(secret);
                    }
                }
            }

            cfg::save_config(&config)?;
            if !global.quiet {
                eprintln!("\nProfile '{profile_name}' written to {}", config_path.display());
            }
            Ok(())
        }

        // ── Show: resolved config with secrets redacted ─────────────
        ConfigCommand::Show => {
            let mut config = cfg::load_config_or_default();
            for profile in config.profiles.values_mut() {
                if profile.secret_key.is_some() {
                    profile.secret_key = Some("<redacted>".into());
                }
            }
            let rendered = toml::to_string_pretty(&config).map_err(|e| CliError::Validation {
                field: "config".into(),
                reason: e.to_string(),
            })?;
            crate::output::print_output(&rendered, global.quiet);
            Ok(())
        }

        // ── Profiles: list with default marker ──────────────────────
        ConfigCommand::Profiles => {
            let config = cfg::load_config_or_default();
            let default = config.default_profile.as_deref().unwrap_or("default");
            let mut names: Vec<&String> = config.profiles.keys().collect();
            names.sort_unstable();

            let mut out = String::new();
            for name in names {
                let marker = if name == default { " (default)" } else { "" };
                let endpoint = &config.profiles[name].endpoint;
                out.push_str(&format!("{name}{marker}  {endpoint}\n"));
            }
            crate::output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        // ── Use: set default profile ────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut config = cfg::load_config_or_default();
            if !config.profiles.contains_key(&name) {
                let mut available: Vec<&str> =
                    config.profiles.keys().map(String::as_str).collect();
                available.sort_unstable();
                return Err(CliError::ProfileNotFound {
                    name,
                    available: available.join(", "),
                });
            }
            config.default_profile = Some(name.clone());
            cfg::save_config(&config)?;
            if !global.quiet {
                eprintln!("Default profile set to '{name}'");
            }
            Ok(())
        }

        // ── SetSecret: store in keyring ─────────────────────────────
        ConfigCommand::SetSecret { profile } => {
            let config = cfg::load_config_or_default();
            let profile_name = profile
                .or_else(|| global.profile.clone())
                .or(config.default_profile)
                .unwrap_or_else(|| "default".into());

            let secret = rpassword::prompt_password(format!(
                "Secret key for profile '{profile_name}': "
            ))?;
            cfg::store_secret_key(&profile_name, &secret)?;
            if !global.quiet {
                eprintln!("Secret key stored in keyring for '{profile_name}'");
            }
            Ok(())
        }
    }
}
