//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use lxdeck_config::ConfigError;
use lxdeck_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const PRECONDITION: i32 = 5;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to LXD at {url}")]
    #[diagnostic(
        code(lxdeck::connection_failed),
        help(
            "Check that the daemon listens on the network (core.https_address)\n\
             and that the URL is right: {reason}"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(lxdeck::auth_failed),
        help(
            "Make sure the client certificate is trusted (lxc config trust add)\n\
             or that the OIDC token is still valid.\n\
             Store a new token with: lxdeck config set-token"
        )
    )]
    AuthFailed { message: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(lxdeck::no_credentials),
        help(
            "Configure credentials with: lxdeck config init\n\
             Or pass --token / set LXDECK_TOKEN."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(lxdeck::not_found),
        help("Run: lxdeck {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Actions ──────────────────────────────────────────────────────
    #[error("Cannot {action} {subject}: {reason}")]
    #[diagnostic(code(lxdeck::precondition))]
    Precondition {
        action: String,
        subject: String,
        reason: String,
    },

    #[error("{title}")]
    #[diagnostic(code(lxdeck::action_failed), help("{detail}"))]
    ActionFailed {
        title: String,
        detail: String,
        exit: i32,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(lxdeck::api_error))]
    ApiError { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(lxdeck::validation))]
    Validation { field: String, reason: String },

    #[error("The network form has errors")]
    #[diagnostic(code(lxdeck::form_invalid), help("{details}"))]
    FormInvalid { details: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(lxdeck::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: lxdeck config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No LXD server configured")]
    #[diagnostic(
        code(lxdeck::no_config),
        help(
            "Create a profile with: lxdeck config init\n\
             Or pass --remote-url. Expected config at: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(lxdeck::config))]
    Config(ConfigError),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(lxdeck::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── Timeout ──────────────────────────────────────────────────────
    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(lxdeck::timeout),
        help("Increase timeout with --timeout or check the daemon's load.")
    )]
    Timeout { seconds: u64 },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {message}")]
    #[diagnostic(code(lxdeck::yaml), help("Check the YAML file contents and try again."))]
    Yaml { message: String },

    #[error("Output serialization failed: {0}")]
    Output(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Precondition { .. } => exit_code::PRECONDITION,
            Self::ActionFailed { exit, .. } => *exit,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::Validation { .. }
            | Self::FormInvalid { .. }
            | Self::NonInteractiveRequiresYes { .. }
            | Self::Yaml { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed { url, reason },

            CoreError::AuthenticationFailed { message } => CliError::AuthFailed { message },

            CoreError::Timeout { timeout_secs } => CliError::Timeout {
                seconds: timeout_secs,
            },

            CoreError::InstanceNotFound { name } => CliError::NotFound {
                resource_type: "instance".into(),
                identifier: name,
                list_command: "instances list".into(),
            },

            CoreError::NetworkNotFound { name } => CliError::NotFound {
                resource_type: "network".into(),
                identifier: name,
                list_command: "networks list".into(),
            },

            CoreError::NotFound { identifier } => CliError::NotFound {
                resource_type: "resource".into(),
                identifier,
                list_command: "--help".into(),
            },

            CoreError::PreconditionFailed { message } => CliError::Precondition {
                action: "run".into(),
                subject: "action".into(),
                reason: message,
            },

            CoreError::UnsupportedType { network_type } => CliError::Validation {
                field: "type".into(),
                reason: format!("'{network_type}' networks cannot be edited with the form"),
            },

            CoreError::ValidationFailed { message } => CliError::Validation {
                field: "input".into(),
                reason: message,
            },

            CoreError::Yaml { message } => CliError::Yaml { message },

            CoreError::OperationFailed { message }
            | CoreError::Api { message, .. }
            | CoreError::Internal(message) => CliError::ApiError { message },

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => CliError::NoCredentials { profile },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            other => CliError::Config(other),
        }
    }
}

/// Exit code a core failure maps to, for failures already reported
/// through a notification.
pub fn core_exit_code(err: &CoreError) -> i32 {
    match err {
        CoreError::ConnectionFailed { .. } => exit_code::CONNECTION,
        CoreError::AuthenticationFailed { .. } => exit_code::AUTH,
        CoreError::InstanceNotFound { .. }
        | CoreError::NetworkNotFound { .. }
        | CoreError::NotFound { .. } => exit_code::NOT_FOUND,
        CoreError::Timeout { .. } => exit_code::TIMEOUT,
        CoreError::PreconditionFailed { .. } => exit_code::PRECONDITION,
        CoreError::ValidationFailed { .. }
        | CoreError::UnsupportedType { .. }
        | CoreError::Yaml { .. } => exit_code::USAGE,
        _ => exit_code::GENERAL,
    }
}
