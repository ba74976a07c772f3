// ── API-to-domain type conversions ──
//
// Bridges raw `lxdeck_api` wire types into `lxdeck_core::model` types and
// turns a `RemoteNetworkModel` back into request bodies.

use lxdeck_api::{InstanceDto, NetworkDto, NetworkPut, NetworksPost, ServerInfo};
use serde_json::Value;

use crate::model::{Instance, InstanceKind, InstanceStatus, Network, RemoteNetworkModel, ServerSettings};

// ── Instances ──────────────────────────────────────────────────────

impl From<InstanceDto> for Instance {
    fn from(dto: InstanceDto) -> Self {
        Self {
            status: InstanceStatus::from_daemon(&dto.status),
            kind: InstanceKind::from_daemon(&dto.instance_type),
            location: Some(dto.location).filter(|l| !l.is_empty() && l != "none"),
            name: dto.name,
            description: dto.description,
            project: dto.project,
            architecture: dto.architecture,
            created_at: dto.created_at,
        }
    }
}

// ── Networks ───────────────────────────────────────────────────────

impl From<NetworkDto> for Network {
    fn from(dto: NetworkDto) -> Self {
        Self {
            name: dto.name,
            description: dto.description,
            network_type: dto.network_type,
            managed: dto.managed,
            status: dto.status,
            config: dto.config,
            used_by: dto.used_by,
        }
    }
}

impl From<&Network> for RemoteNetworkModel {
    fn from(network: &Network) -> Self {
        Self {
            name: network.name.clone(),
            description: network.description.clone(),
            network_type: network.network_type.clone(),
            config: network.config.clone(),
        }
    }
}

impl From<&RemoteNetworkModel> for NetworksPost {
    fn from(model: &RemoteNetworkModel) -> Self {
        Self {
            name: model.name.clone(),
            description: model.description.clone(),
            network_type: model.network_type.clone(),
            config: model.config.clone(),
        }
    }
}

impl From<&RemoteNetworkModel> for NetworkPut {
    fn from(model: &RemoteNetworkModel) -> Self {
        Self {
            description: model.description.clone(),
            config: model.config.clone(),
        }
    }
}

// ── Server ─────────────────────────────────────────────────────────

/// Flatten a server config value to the string form the form logic reads.
fn config_value_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl From<ServerInfo> for ServerSettings {
    fn from(info: ServerInfo) -> Self {
        Self {
            config: info
                .config
                .into_iter()
                .map(|(k, v)| (k, config_value_to_string(v)))
                .collect(),
            os_name: info.environment.os_name,
            os_version: info.environment.os_version,
            server_version: info.environment.server_version,
            kernel: info.environment.kernel,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn instance_from_dto() {
        let dto: InstanceDto = serde_json::from_value(json!({
            "name": "web-1",
            "status": "Frozen",
            "type": "virtual-machine",
            "location": "none",
            "project": "default"
        }))
        .unwrap();
        let instance = Instance::from(dto);
        assert_eq!(instance.status, InstanceStatus::Frozen);
        assert_eq!(instance.kind, InstanceKind::VirtualMachine);
        assert!(instance.location.is_none());
    }

    #[test]
    fn settings_flatten_config_values() {
        let info: ServerInfo = serde_json::from_value(json!({
            "config": {
                "network.ovn.northbound_connection": "tcp:10.0.0.1:6641",
                "core.https_address": ":8443",
                "images.auto_update_interval": 6
            },
            "environment": { "os_name": "Ubuntu" }
        }))
        .unwrap();
        let settings = ServerSettings::from(info);
        assert!(settings.has_ovn());
        assert!(settings.has_fan());
        assert_eq!(settings.config["images.auto_update_interval"], "6");
    }
}
