//! CLI configuration: thin wrapper around `lxdeck_config` shared types.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--remote-url, --project, --token, --insecure, --timeout).

use std::time::Duration;

use secrecy::SecretString;

use lxdeck_core::{AuthCredentials, ConsoleConfig, TlsVerification};

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use lxdeck_config::{
    Config, Defaults, Profile, config_path, load_config_or_default, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Comma-separated profile names for diagnostics.
pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Build a `ConsoleConfig` from the config file, profile, and CLI overrides.
pub fn build_console_config(global: &GlobalOpts) -> Result<ConsoleConfig, CliError> {
    let cfg = load_config_or_default();
    let profile_name = active_profile_name(global, &cfg);

    if let Some(profile) = cfg.profiles.get(&profile_name) {
        return resolve_profile(profile, &profile_name, global, &cfg.defaults);
    }

    // An explicitly requested profile must exist.
    if global.profile.is_some() {
        return Err(CliError::ProfileNotFound {
            name: profile_name,
            available: available_profiles(&cfg),
        });
    }

    // No profile: build from flags / env vars alone.
    let url_str = global
        .remote_url
        .as_deref()
        .ok_or_else(|| CliError::NoConfig {
            path: config_path().display().to_string(),
        })?;
    let url = lxdeck_config::parse_url(url_str)?;

    let auth = global.token.as_ref().map_or(AuthCredentials::Untrusted, |token| {
        AuthCredentials::OidcToken(SecretString::from(token.clone()))
    });

    let mut config = ConsoleConfig::new(url);
    config.auth = auth;
    if let Some(ref project) = global.project {
        config.project.clone_from(project);
    }
    config.timeout = Duration::from_secs(global.timeout);
    Ok(config)
}

/// Translate a `Profile` + global flags into a `ConsoleConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    defaults: &Defaults,
) -> Result<ConsoleConfig, CliError> {
    // 1. URL (flag > env > profile)
    let url_str = global.remote_url.as_deref().unwrap_or(&profile.url);
    let url = lxdeck_config::parse_url(url_str)?;

    // 2. Auth (a token flag switches to OIDC)
    let auth = match global.token {
        Some(ref token) => AuthCredentials::OidcToken(SecretString::from(token.clone())),
        None => lxdeck_config::resolve_auth(profile, profile_name)?,
    };

    // 3. TLS verification
    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        lxdeck_config::resolve_tls(profile, defaults.insecure)
    };

    // 4. Project (flag > env > profile)
    let project = global.project.as_deref().unwrap_or(&profile.project).to_owned();

    // 5. Timeout (profile > flag default)
    let timeout = Duration::from_secs(profile.timeout.unwrap_or(global.timeout));

    Ok(ConsoleConfig {
        url,
        auth,
        project,
        tls,
        timeout,
    })
}
