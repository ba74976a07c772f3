// ── Core error types ──
//
// User-facing errors from lxdeck-core. Consumers never match on HTTP
// envelopes or JSON parse failures directly; the `From<lxdeck_api::Error>`
// impl translates transport-layer errors into domain variants while
// keeping the daemon's own message intact for notifications.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to LXD at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Instance not found: {name}")]
    InstanceNotFound { name: String },

    #[error("Network not found: {name}")]
    NetworkNotFound { name: String },

    #[error("Not found: {identifier}")]
    NotFound { identifier: String },

    // ── Operation errors ─────────────────────────────────────────────
    #[error("Action not available: {message}")]
    PreconditionFailed { message: String },

    #[error("Unsupported network type: {network_type}")]
    UnsupportedType { network_type: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("Invalid YAML: {message}")]
    Yaml { message: String },

    #[error("Operation failed: {message}")]
    OperationFailed { message: String },

    // ── API errors (wrapped, not exposed raw) ────────────────────────
    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status or envelope error code.
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// The message worth showing in a failure notification body.
    ///
    /// Server-originated errors return the daemon's text verbatim; local
    /// errors fall back to their display form.
    pub fn detail(&self) -> String {
        match self {
            Self::AuthenticationFailed { message }
            | Self::OperationFailed { message }
            | Self::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::InstanceNotFound { .. } | Self::NetworkNotFound { .. } | Self::NotFound { .. }
        )
    }
}

impl From<serde_yaml::Error> for CoreError {
    fn from(err: serde_yaml::Error) -> Self {
        CoreError::Yaml {
            message: err.to_string(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<lxdeck_api::Error> for CoreError {
    fn from(err: lxdeck_api::Error) -> Self {
        if err.is_not_found() {
            return CoreError::NotFound {
                identifier: err.detail(),
            };
        }

        match err {
            lxdeck_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            lxdeck_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            lxdeck_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            lxdeck_api::Error::Timeout { timeout_secs } => CoreError::Timeout { timeout_secs },
            lxdeck_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            lxdeck_api::Error::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            lxdeck_api::Error::OperationFailed { message, .. } => {
                CoreError::OperationFailed { message }
            }
            lxdeck_api::Error::UnexpectedResponse(message) => CoreError::Internal(message),
            lxdeck_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_keeps_server_detail() {
        let err = CoreError::from(lxdeck_api::Error::Api {
            status: 400,
            message: "Network is in use".into(),
        });
        assert!(matches!(err, CoreError::Api { status: Some(400), .. }));
        assert_eq!(err.detail(), "Network is in use");
    }

    #[test]
    fn not_found_is_detected_before_mapping() {
        let err = CoreError::from(lxdeck_api::Error::Api {
            status: 404,
            message: "Instance not found".into(),
        });
        assert!(err.is_not_found());
    }

    #[test]
    fn local_errors_use_display() {
        let err = CoreError::PreconditionFailed {
            message: "instance web-1 is not running".into(),
        };
        assert_eq!(
            err.detail(),
            "Action not available: instance web-1 is not running"
        );
    }
}
