//! Shared configuration for lxdeck front ends.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext),
//! and translation to `lxdeck_core::ConsoleConfig`. The CLI adds
//! flag-aware wrappers on top.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use lxdeck_core::{AuthCredentials, ConsoleConfig, TlsVerification};

/// Keyring service name. Entries are keyed `{profile}/token`.
pub const KEYRING_SERVICE: &str = "lxdeck";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
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

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named server profiles.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named LXD server profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Server URL (e.g., "https://10.0.0.2:8443").
    pub url: String,

    #[serde(default = "default_project")]
    pub project: String,

    /// "tls" (client certificate), "oidc" (bearer token) or "untrusted".
    #[serde(default = "default_auth_mode")]
    pub auth_mode: String,

    /// PEM client certificate for tls auth.
    pub client_cert: Option<PathBuf>,

    /// PEM private key matching `client_cert`.
    pub client_key: Option<PathBuf>,

    /// OIDC access token (plaintext, prefer keyring or env var).
    pub token: Option<String>,

    /// Environment variable holding the OIDC token.
    pub token_env: Option<String>,

    /// Server certificate or CA to trust instead of skipping verification.
    pub ca_cert: Option<PathBuf>,

    pub insecure: Option<bool>,

    pub timeout: Option<u64>,
}

impl Profile {
    /// Empty tls profile for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            project: default_project(),
            auth_mode: default_auth_mode(),
            client_cert: None,
            client_key: None,
            token: None,
            token_env: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

fn default_project() -> String {
    "default".into()
}
fn default_auth_mode() -> String {
    "tls".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "lxdeck", "lxdeck").map_or_else(
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
    p.push("lxdeck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file, still layering `LXDECK_*` env vars on top.
///
/// Nested keys use a double underscore: `LXDECK_DEFAULTS__TIMEOUT=60`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LXDECK_").split("__"));

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
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Keyring entry name for a profile's OIDC token.
pub fn token_entry_name(profile_name: &str) -> String {
    format!("{profile_name}/token")
}

/// Resolve an OIDC token from the credential chain (no CLI flag step).
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    // 1. Profile's token_env → env var lookup
    if let Some(val) = profile
        .token_env
        .as_ref()
        .and_then(|name| std::env::var(name).ok())
    {
        return Ok(SecretString::from(val));
    }

    // 2. System keyring
    if let Some(secret) = keyring::Entry::new(KEYRING_SERVICE, &token_entry_name(profile_name))
        .ok()
        .and_then(|entry| entry.get_password().ok())
    {
        return Ok(SecretString::from(secret));
    }

    // 3. Plaintext in config
    if let Some(ref token) = profile.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Both halves of a client certificate, or `NoCredentials`.
pub fn resolve_client_certificate(
    profile: &Profile,
    profile_name: &str,
) -> Result<(PathBuf, PathBuf), ConfigError> {
    match (&profile.client_cert, &profile.client_key) {
        (Some(cert), Some(key)) => Ok((cert.clone(), key.clone())),
        (Some(_), None) => Err(ConfigError::Validation {
            field: "client_key".into(),
            reason: "client_cert is set but client_key is missing".into(),
        }),
        (None, Some(_)) => Err(ConfigError::Validation {
            field: "client_cert".into(),
            reason: "client_key is set but client_cert is missing".into(),
        }),
        (None, None) => Err(ConfigError::NoCredentials {
            profile: profile_name.into(),
        }),
    }
}

/// Resolve `AuthCredentials` from a profile's `auth_mode` field.
pub fn resolve_auth(profile: &Profile, profile_name: &str) -> Result<AuthCredentials, ConfigError> {
    match profile.auth_mode.as_str() {
        "tls" => {
            let (cert, key) = resolve_client_certificate(profile, profile_name)?;
            Ok(AuthCredentials::ClientCertificate { cert, key })
        }
        "oidc" => Ok(AuthCredentials::OidcToken(resolve_token(
            profile,
            profile_name,
        )?)),
        "untrusted" => Ok(AuthCredentials::Untrusted),
        other => Err(ConfigError::Validation {
            field: "auth_mode".into(),
            reason: format!("expected 'tls', 'oidc', or 'untrusted', got '{other}'"),
        }),
    }
}

/// Trust mode for a profile. LXD ships a self-signed certificate, so
/// without `ca_cert` verification is skipped.
pub fn resolve_tls(profile: &Profile, insecure_default: bool) -> TlsVerification {
    if profile.insecure.unwrap_or(insecure_default) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::DangerAcceptInvalid
    }
}

pub fn parse_url(raw: &str) -> Result<url::Url, ConfigError> {
    raw.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Build a `ConsoleConfig` from a profile, no CLI flag overrides.
pub fn profile_to_console_config(
    profile: &Profile,
    profile_name: &str,
) -> Result<ConsoleConfig, ConfigError> {
    let url = parse_url(&profile.url)?;
    let auth = resolve_auth(profile, profile_name)?;

    Ok(ConsoleConfig {
        url,
        auth,
        project: profile.project.clone(),
        tls: resolve_tls(profile, false),
        timeout: Duration::from_secs(profile.timeout.unwrap_or_else(default_timeout)),
    })
}
