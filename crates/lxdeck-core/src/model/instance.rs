// ── Instance domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Instance runtime state as reported by the daemon's `status` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[non_exhaustive]
pub enum InstanceStatus {
    Running,
    Stopped,
    Frozen,
    Error,
    Unknown,
}

impl InstanceStatus {
    /// Parse the daemon's status string; unrecognised states map to `Unknown`.
    pub fn from_daemon(raw: &str) -> Self {
        raw.parse().unwrap_or(Self::Unknown)
    }

    pub fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum InstanceKind {
    Container,
    VirtualMachine,
    Unknown,
}

impl InstanceKind {
    pub fn from_daemon(raw: &str) -> Self {
        match raw {
            "container" => Self::Container,
            "virtual-machine" => Self::VirtualMachine,
            _ => Self::Unknown,
        }
    }
}

/// A container or virtual machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instance {
    pub name: String,
    pub status: InstanceStatus,
    pub kind: InstanceKind,
    pub description: String,
    pub location: Option<String>,
    pub project: String,
    pub architecture: String,
    pub created_at: Option<DateTime<Utc>>,
}

impl Instance {
    pub fn new(name: impl Into<String>, status: InstanceStatus) -> Self {
        Self {
            name: name.into(),
            status,
            kind: InstanceKind::Container,
            description: String::new(),
            location: None,
            project: lxdeck_api::client::DEFAULT_PROJECT.into(),
            architecture: String::new(),
            created_at: None,
        }
    }
}
