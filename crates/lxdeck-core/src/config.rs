// ── Runtime connection configuration ──
//
// These types describe *how* to reach an LXD server. They carry
// credential data and connection tuning, but never touch disk.
// The CLI constructs a `ConsoleConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// How to authenticate with the server.
///
/// Carries the actual credential material; `lxdeck_api::Credentials`
/// is the transport-level mirror.
#[derive(Debug, Clone)]
pub enum AuthCredentials {
    /// No identity. Only the server info endpoint will answer.
    Untrusted,
    /// TLS client certificate added to the server's trust store.
    ClientCertificate { cert: PathBuf, key: PathBuf },
    /// OIDC access token.
    OidcToken(SecretString),
}

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA or pinned server certificate file.
    CustomCa(PathBuf),
    /// Skip verification. LXD generates a self-signed cert on first start.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single LXD server.
///
/// Built by the CLI, passed to `Console`. Core never reads config files.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Server URL (e.g., `https://10.0.0.2:8443`).
    pub url: Url,
    pub auth: AuthCredentials,
    /// Project all requests are scoped to.
    pub project: String,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl ConsoleConfig {
    /// Untrusted config for `url` with default project, TLS mode and timeout.
    pub fn new(url: Url) -> Self {
        Self {
            url,
            auth: AuthCredentials::Untrusted,
            project: lxdeck_api::client::DEFAULT_PROJECT.into(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}
