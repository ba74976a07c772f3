// ── Network domain types ──

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Network type as offered by the create form.
///
/// The two bridge flavours collapse to `bridge` on the wire; the
/// distinction survives only in the `bridge.mode` config key.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NetworkType {
    #[default]
    BridgeStandard,
    BridgeFan,
    Ovn,
    Macvlan,
    Sriov,
    Physical,
}

impl NetworkType {
    pub fn is_bridge(self) -> bool {
        self.as_ref().starts_with("bridge")
    }

    /// Only bridge and OVN networks can be created or edited from the form.
    pub fn is_actionable(self) -> bool {
        matches!(self, Self::BridgeStandard | Self::BridgeFan | Self::Ovn)
    }

    /// The `type` value the daemon expects.
    pub fn remote_type(self) -> &'static str {
        match self {
            Self::BridgeStandard | Self::BridgeFan => "bridge",
            Self::Ovn => "ovn",
            Self::Macvlan => "macvlan",
            Self::Sriov => "sriov",
            Self::Physical => "physical",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::BridgeStandard => "Bridge (standard)",
            Self::BridgeFan => "Bridge (fan)",
            Self::Ovn => "OVN",
            Self::Macvlan => "Macvlan",
            Self::Sriov => "SR-IOV",
            Self::Physical => "Physical",
        }
    }
}

/// A network as listed by the server, managed or not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub name: String,
    pub description: String,
    /// Raw daemon type (`bridge`, `ovn`, `physical`, `loopback`, ...).
    pub network_type: String,
    pub managed: bool,
    pub status: String,
    pub config: BTreeMap<String, String>,
    pub used_by: Vec<String>,
}

impl Network {
    pub fn is_in_use(&self) -> bool {
        !self.used_by.is_empty()
    }

    /// Only managed networks with no remaining references can be deleted.
    pub fn is_deletable(&self) -> bool {
        self.managed && !self.is_in_use()
    }
}

/// The nested representation the daemon accepts for create and update.
///
/// Produced by the form mapper and by the YAML editor; `config` keys are
/// dotted paths such as `ipv4.dhcp.ranges` or `user.owner`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteNetworkModel {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub network_type: String,
    #[serde(default)]
    pub config: BTreeMap<String, String>,
}
