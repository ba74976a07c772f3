use std::path::PathBuf;

use secrecy::SecretString;

/// Credentials for authenticating with an LXD server.
///
/// Each variant carries the material needed for its auth flow.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// No client identity. Only `GET /1.0` answers in this mode.
    Untrusted,

    /// Mutual TLS with a client certificate trusted by the server
    /// (`lxc config trust add`). Both files are PEM encoded.
    ClientCertificate { cert: PathBuf, key: PathBuf },

    /// OIDC access token sent as `Authorization: Bearer <token>`.
    Bearer { token: SecretString },
}

impl Credentials {
    /// Short label for logs and diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Untrusted => "untrusted",
            Self::ClientCertificate { .. } => "tls",
            Self::Bearer { .. } => "oidc",
        }
    }
}
