use thiserror::Error;

/// Top-level error type for the `lxdeck-api` crate.
///
/// Covers transport, envelope, and background-operation failures.
/// `lxdeck-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// The server refused our identity (untrusted certificate, bad token).
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request timed out.
    #[error("Request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// TLS setup or client identity error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── LXD envelope ────────────────────────────────────────────────
    /// Error envelope returned by the daemon (`{"type": "error", ...}`).
    #[error("LXD API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// A background operation finished in the `Failure` state.
    #[error("Operation {id} failed: {message}")]
    OperationFailed { id: String, message: String },

    /// The daemon answered with an envelope shape we did not expect.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            Self::Api { status: 404, .. } => true,
            _ => false,
        }
    }

    /// Returns `true` if this is a transient error worth re-issuing by hand.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout { .. } => true,
            _ => false,
        }
    }

    /// The server-provided detail, without our own prefix.
    pub fn detail(&self) -> String {
        match self {
            Self::Api { message, .. }
            | Self::OperationFailed { message, .. }
            | Self::Authentication { message } => message.clone(),
            other => other.to_string(),
        }
    }
}
