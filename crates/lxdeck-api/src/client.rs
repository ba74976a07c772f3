// LXD HTTP client
//
// Wraps `reqwest::Client` with `/1.0` URL construction, project scoping,
// envelope unwrapping and background-operation waiting. Endpoint groups
// (server, instances, networks, operations) are inherent methods in
// separate files to keep this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::models::{LxdResponse, ResponseType};
use crate::transport::TransportConfig;

/// The project every LXD server has; requests for it omit `?project=`.
pub const DEFAULT_PROJECT: &str = "default";

/// Raw HTTP client for an LXD server's REST API.
///
/// All methods return unwrapped `metadata` payloads -- the envelope is
/// stripped before the caller sees it. Async responses are awaited
/// through the operations endpoint, so mutations resolve only once the
/// daemon reports a terminal state.
pub struct LxdClient {
    http: reqwest::Client,
    base_url: Url,
    project: String,
}

impl LxdClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// `base_url` is the server root, e.g. `https://10.0.0.2:8443`.
    pub fn new(base_url: Url, project: String, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, base_url, project))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url, project: String) -> Self {
        Self {
            http,
            base_url,
            project,
        }
    }

    /// The project all requests are scoped to.
    pub fn project(&self) -> &str {
        &self.project
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/1.0/{path}` with the project query parameter applied.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let mut url = self.base_url.join(&format!("/1.0/{}", path.trim_start_matches('/')))?;
        if self.project != DEFAULT_PROJECT {
            url.query_pairs_mut().append_pair("project", &self.project);
        }
        Ok(url)
    }

    /// Same as [`api_url`](Self::api_url) with `recursion=1`, used by list endpoints.
    pub(crate) fn list_url(&self, path: &str) -> Result<Url, Error> {
        let mut url = self.api_url(path)?;
        url.query_pairs_mut().append_pair("recursion", "1");
        Ok(url)
    }

    /// Resolve an absolute operation path (`/1.0/operations/<id>`) against the base.
    pub(crate) fn operation_url(&self, operation: &str, suffix: &str) -> Result<Url, Error> {
        let mut url = self.base_url.join(&format!("{operation}{suffix}"))?;
        if self.project != DEFAULT_PROJECT {
            url.query_pairs_mut().append_pair("project", &self.project);
        }
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and deserialize the envelope's metadata.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);
        let resp = self.http.get(url).send().await?;
        let envelope = parse_envelope(resp).await?;
        decode_metadata(envelope.metadata)
    }

    /// POST a JSON body; waits for the operation if the daemon answers async.
    pub(crate) async fn post(&self, url: Url, body: &(impl Serialize + Sync)) -> Result<(), Error> {
        debug!("POST {}", url);
        let resp = self.http.post(url).json(body).send().await?;
        self.complete(resp).await
    }

    /// PUT a JSON body; waits for the operation if the daemon answers async.
    pub(crate) async fn put(&self, url: Url, body: &(impl Serialize + Sync)) -> Result<(), Error> {
        debug!("PUT {}", url);
        let resp = self.http.put(url).json(body).send().await?;
        self.complete(resp).await
    }

    /// DELETE; waits for the operation if the daemon answers async.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);
        let resp = self.http.delete(url).send().await?;
        self.complete(resp).await
    }

    /// Finish a mutation: sync responses are done, async ones are waited on.
    async fn complete(&self, resp: reqwest::Response) -> Result<(), Error> {
        let envelope = parse_envelope(resp).await?;
        match envelope.kind {
            ResponseType::Sync => Ok(()),
            ResponseType::Async => {
                if envelope.operation.is_empty() {
                    return Err(Error::UnexpectedResponse(
                        "async response without an operation URL".into(),
                    ));
                }
                let op = self.wait_operation(&envelope.operation).await?;
                if op.is_success() {
                    Ok(())
                } else {
                    Err(Error::OperationFailed {
                        id: op.id,
                        message: if op.err.is_empty() { op.status } else { op.err },
                    })
                }
            }
            ResponseType::Error => Err(Error::Api {
                status: envelope.error_code,
                message: envelope.error,
            }),
        }
    }
}

/// Parse the envelope, turning HTTP and `type: error` failures into `Error`.
async fn parse_envelope(resp: reqwest::Response) -> Result<LxdResponse, Error> {
    let status = resp.status();
    let body = resp.text().await?;
    trace!(%status, len = body.len(), "response received");

    let parsed: Result<LxdResponse, _> = serde_json::from_str(&body);

    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        let message = parsed
            .ok()
            .map(|e| e.error)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "client is not trusted by the server".into());
        return Err(Error::Authentication { message });
    }

    let envelope = match parsed {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => {
            return Err(Error::Deserialization {
                message: format!("{e} (body preview: {:?})", preview(&body)),
                body,
            });
        }
        Err(_) => {
            return Err(Error::Api {
                status: status.as_u16(),
                message: format!("HTTP {status}: {}", preview(&body)),
            });
        }
    };

    if envelope.kind == ResponseType::Error || !status.is_success() {
        let code = if envelope.error_code == 0 {
            status.as_u16()
        } else {
            envelope.error_code
        };
        return Err(Error::Api {
            status: code,
            message: envelope.error,
        });
    }

    Ok(envelope)
}

fn preview(body: &str) -> String {
    body.chars().take(200).collect()
}

fn decode_metadata<T: DeserializeOwned>(metadata: serde_json::Value) -> Result<T, Error> {
    serde_json::from_value(metadata.clone()).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: metadata.to_string(),
    })
}
