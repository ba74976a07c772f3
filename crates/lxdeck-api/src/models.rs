// LXD wire types
//
// Every response is wrapped in the standard envelope:
// `{ type: sync|async|error, status, status_code, operation, error_code, error, metadata }`.
// Request bodies mirror the daemon's `*Put` / `*Post` structs.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Envelope ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseType {
    Sync,
    Async,
    Error,
}

/// Raw response envelope. `metadata` stays untyped until the caller
/// knows what it asked for.
#[derive(Debug, Deserialize)]
pub struct LxdResponse {
    #[serde(rename = "type")]
    pub kind: ResponseType,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub status_code: u16,
    /// Operation URL for async responses, e.g. `/1.0/operations/<uuid>`.
    #[serde(default)]
    pub operation: String,
    #[serde(default)]
    pub error_code: u16,
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

// ── Server ───────────────────────────────────────────────────────────

/// `GET /1.0`: server configuration and host environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerInfo {
    /// Server config. Values are strings on every released daemon, but
    /// newer API extensions are allowed to send other JSON scalars.
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub environment: ServerEnvironment,
    #[serde(default)]
    pub api_extensions: Vec<String>,
    /// `trusted` or `untrusted`.
    #[serde(default)]
    pub auth: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerEnvironment {
    #[serde(default)]
    pub os_name: String,
    #[serde(default)]
    pub os_version: String,
    #[serde(default)]
    pub server_version: String,
    #[serde(default)]
    pub server_name: String,
    #[serde(default)]
    pub kernel: String,
}

// ── Instances ────────────────────────────────────────────────────────

/// `GET /1.0/instances?recursion=1` element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceDto {
    pub name: String,
    /// Human status: `Running`, `Stopped`, `Frozen`, `Error`, ...
    pub status: String,
    #[serde(default)]
    pub status_code: u16,
    /// `container` or `virtual-machine`.
    #[serde(rename = "type", default)]
    pub instance_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub architecture: String,
    #[serde(default)]
    pub ephemeral: bool,
    #[serde(default)]
    pub stateful: bool,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

/// `PUT /1.0/instances/{name}/state` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InstanceStatePut {
    /// `start`, `stop`, `restart`, `freeze` or `unfreeze`.
    pub action: String,
    /// Seconds to wait for a clean shutdown; `-1` means the daemon default.
    pub timeout: i64,
    pub force: bool,
    pub stateful: bool,
}

impl InstanceStatePut {
    pub fn new(action: impl Into<String>, force: bool) -> Self {
        Self {
            action: action.into(),
            timeout: -1,
            force,
            stateful: false,
        }
    }
}

// ── Networks ─────────────────────────────────────────────────────────

/// `GET /1.0/networks?recursion=1` element.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDto {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub network_type: String,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
    #[serde(default)]
    pub used_by: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

/// `POST /1.0/networks` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworksPost {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub network_type: String,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

/// `PUT /1.0/networks/{name}` body. Replaces the whole config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkPut {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}

// ── Operations ───────────────────────────────────────────────────────

/// Background operation, as returned by `GET /1.0/operations/{id}/wait`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    #[serde(default)]
    pub class: String,
    #[serde(default)]
    pub description: String,
    /// `Pending`, `Running`, `Success`, `Failure`, `Cancelled`.
    pub status: String,
    pub status_code: u16,
    #[serde(default)]
    pub err: String,
}

impl Operation {
    /// Terminal states carry a status code of 200 or above.
    pub fn is_finished(&self) -> bool {
        self.status_code >= 200
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_envelope_parses() {
        let env: LxdResponse = serde_json::from_value(json!({
            "type": "error",
            "error": "Instance not found",
            "error_code": 404,
            "metadata": null
        }))
        .unwrap();
        assert_eq!(env.kind, ResponseType::Error);
        assert_eq!(env.error_code, 404);
        assert!(env.metadata.is_null());
    }

    #[test]
    fn operation_states() {
        let running: Operation = serde_json::from_value(json!({
            "id": "x", "status": "Running", "status_code": 103
        }))
        .unwrap();
        assert!(!running.is_finished());

        let failed: Operation = serde_json::from_value(json!({
            "id": "x", "status": "Failure", "status_code": 400, "err": "boom"
        }))
        .unwrap();
        assert!(failed.is_finished());
        assert!(!failed.is_success());
    }

    #[test]
    fn state_put_defaults_to_daemon_timeout() {
        let body = serde_json::to_value(InstanceStatePut::new("stop", true)).unwrap();
        assert_eq!(
            body,
            json!({"action": "stop", "timeout": -1, "force": true, "stateful": false})
        );
    }
}
