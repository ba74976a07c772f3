// ── Server settings ──
//
// The subset of `GET /1.0` that gates form options: OVN availability
// comes from the server config, fan availability from the host OS.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Config key whose presence means OVN networks can be created.
pub const OVN_NORTHBOUND_KEY: &str = "network.ovn.northbound_connection";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    pub config: BTreeMap<String, String>,
    pub os_name: String,
    pub os_version: String,
    pub server_version: String,
    pub kernel: String,
}

impl ServerSettings {
    /// OVN is usable once a northbound database connection is configured.
    pub fn has_ovn(&self) -> bool {
        self.config
            .get(OVN_NORTHBOUND_KEY)
            .is_some_and(|v| !v.is_empty())
    }

    /// Fan bridges are an Ubuntu kernel feature.
    pub fn has_fan(&self) -> bool {
        self.os_name.to_lowercase().contains("ubuntu")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ovn_requires_non_empty_connection() {
        let mut settings = ServerSettings::default();
        assert!(!settings.has_ovn());

        settings.config.insert(OVN_NORTHBOUND_KEY.into(), String::new());
        assert!(!settings.has_ovn());

        settings
            .config
            .insert(OVN_NORTHBOUND_KEY.into(), "tcp:10.0.0.1:6641".into());
        assert!(settings.has_ovn());
    }

    #[test]
    fn fan_matches_ubuntu_case_insensitively() {
        let settings = ServerSettings {
            os_name: "Ubuntu Core".into(),
            ..ServerSettings::default()
        };
        assert!(settings.has_fan());

        let settings = ServerSettings {
            os_name: "Debian GNU/Linux".into(),
            ..ServerSettings::default()
        };
        assert!(!settings.has_fan());
    }
}
