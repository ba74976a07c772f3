// Shared transport configuration for building reqwest::Client instances.
//
// TLS trust, client identity, bearer token and timeout live here so the
// client module only deals with URLs and envelopes.

use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;

use crate::auth::Credentials;
use crate::error::Error;

/// TLS verification mode (api-level mirror of core's TlsVerification).
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate (usually the server's own cert) from a PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (LXD ships a self-signed one by default).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
    pub credentials: Credentials,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(30),
            credentials: Credentials::Untrusted,
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("lxdeck/", env!("CARGO_PKG_VERSION")));

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        match &self.credentials {
            Credentials::Untrusted => {}
            Credentials::ClientCertificate { cert, key } => {
                builder = builder.identity(load_identity(cert, key)?);
            }
            Credentials::Bearer { token } => {
                let mut value =
                    HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                        .map_err(|e| Error::Tls(format!("invalid bearer token: {e}")))?;
                value.set_sensitive(true);
                let mut headers = HeaderMap::new();
                headers.insert(AUTHORIZATION, value);
                builder = builder.default_headers(headers);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}

/// Concatenate the client certificate and key into one PEM identity.
fn load_identity(cert: &Path, key: &Path) -> Result<reqwest::Identity, Error> {
    let mut pem = std::fs::read(cert)
        .map_err(|e| Error::Tls(format!("failed to read client cert {}: {e}", cert.display())))?;
    let key_pem = std::fs::read(key)
        .map_err(|e| Error::Tls(format!("failed to read client key {}: {e}", key.display())))?;
    pem.push(b'\n');
    pem.extend_from_slice(&key_pem);
    reqwest::Identity::from_pem(&pem)
        .map_err(|e| Error::Tls(format!("invalid client identity: {e}")))
}
