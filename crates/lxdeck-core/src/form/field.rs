// ── Network form fields and sections ──
//
// Static metadata for every field the network form knows: its stable
// identifier, the dotted config key it maps to, a label and an input kind.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

/// Identifier of a single network form field.
///
/// Identifiers are the snake_case form names (`ipv4_dhcp_ranges`), which
/// is also how the CLI accepts them in `--set field=value`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldId {
    // Details
    Name,
    Description,
    Type,
    /// OVN uplink network.
    Network,

    // Bridge
    BridgeDriver,
    BridgeExternalInterfaces,
    BridgeHwaddr,
    BridgeMode,
    BridgeMtu,
    FanOverlaySubnet,
    FanType,
    FanUnderlaySubnet,

    // DNS
    DnsDomain,
    DnsMode,
    DnsNameservers,
    DnsSearch,
    DnsZoneForward,
    DnsZoneReverseIpv4,
    DnsZoneReverseIpv6,

    // IPv4
    Ipv4Address,
    Ipv4Dhcp,
    Ipv4DhcpExpiry,
    Ipv4DhcpGateway,
    Ipv4DhcpRanges,
    Ipv4Firewall,
    Ipv4L3only,
    Ipv4Nat,
    Ipv4NatAddress,
    Ipv4NatOrder,
    Ipv4OvnRanges,
    Ipv4Routes,
    Ipv4Routing,

    // IPv6
    Ipv6Address,
    Ipv6Dhcp,
    Ipv6DhcpExpiry,
    Ipv6DhcpRanges,
    Ipv6DhcpStateful,
    Ipv6Firewall,
    Ipv6L3only,
    Ipv6Nat,
    Ipv6NatAddress,
    Ipv6NatOrder,
    Ipv6OvnRanges,
    Ipv6OvnRoutes,
    Ipv6OvnRouting,
}

/// How a field is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// `"true"` / `"false"`.
    Toggle,
    /// One of a fixed set of values.
    Choice(&'static [&'static str]),
}

const TOGGLE_VALUES: &[&str] = &["true", "false"];

impl FieldKind {
    /// Accepted values, if the kind restricts them.
    pub fn choices(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Text => None,
            Self::Toggle => Some(TOGGLE_VALUES),
            Self::Choice(values) => Some(values),
        }
    }
}

impl FieldId {
    /// Config key in the remote model; `None` for top-level attributes.
    pub fn config_key(self) -> Option<&'static str> {
        let key = match self {
            Self::Name | Self::Description | Self::Type => return None,
            Self::Network => "network",
            Self::BridgeDriver => "bridge.driver",
            Self::BridgeExternalInterfaces => "bridge.external_interfaces",
            Self::BridgeHwaddr => "bridge.hwaddr",
            Self::BridgeMode => "bridge.mode",
            Self::BridgeMtu => "bridge.mtu",
            Self::FanOverlaySubnet => "fan.overlay_subnet",
            Self::FanType => "fan.type",
            Self::FanUnderlaySubnet => "fan.underlay_subnet",
            Self::DnsDomain => "dns.domain",
            Self::DnsMode => "dns.mode",
            Self::DnsNameservers => "dns.nameservers",
            Self::DnsSearch => "dns.search",
            Self::DnsZoneForward => "dns.zone.forward",
            Self::DnsZoneReverseIpv4 => "dns.zone.reverse.ipv4",
            Self::DnsZoneReverseIpv6 => "dns.zone.reverse.ipv6",
            Self::Ipv4Address => "ipv4.address",
            Self::Ipv4Dhcp => "ipv4.dhcp",
            Self::Ipv4DhcpExpiry => "ipv4.dhcp.expiry",
            Self::Ipv4DhcpGateway => "ipv4.dhcp.gateway",
            Self::Ipv4DhcpRanges => "ipv4.dhcp.ranges",
            Self::Ipv4Firewall => "ipv4.firewall",
            Self::Ipv4L3only => "ipv4.l3only",
            Self::Ipv4Nat => "ipv4.nat",
            Self::Ipv4NatAddress => "ipv4.nat.address",
            Self::Ipv4NatOrder => "ipv4.nat.order",
            Self::Ipv4OvnRanges => "ipv4.ovn.ranges",
            Self::Ipv4Routes => "ipv4.routes",
            Self::Ipv4Routing => "ipv4.routing",
            Self::Ipv6Address => "ipv6.address",
            Self::Ipv6Dhcp => "ipv6.dhcp",
            Self::Ipv6DhcpExpiry => "ipv6.dhcp.expiry",
            Self::Ipv6DhcpRanges => "ipv6.dhcp.ranges",
            Self::Ipv6DhcpStateful => "ipv6.dhcp.stateful",
            Self::Ipv6Firewall => "ipv6.firewall",
            Self::Ipv6L3only => "ipv6.l3only",
            Self::Ipv6Nat => "ipv6.nat",
            Self::Ipv6NatAddress => "ipv6.nat.address",
            Self::Ipv6NatOrder => "ipv6.nat.order",
            Self::Ipv6OvnRanges => "ipv6.ovn.ranges",
            Self::Ipv6OvnRoutes => "ipv6.ovn.routes",
            Self::Ipv6OvnRouting => "ipv6.ovn.routing",
        };
        Some(key)
    }

    /// Reverse of [`config_key`](Self::config_key).
    pub fn from_config_key(key: &str) -> Option<Self> {
        Self::iter().find(|f| f.config_key() == Some(key))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::Type => "Type",
            Self::Network => "Uplink",
            Self::BridgeDriver => "Bridge driver",
            Self::BridgeExternalInterfaces => "Bridge external interfaces",
            Self::BridgeHwaddr => "MAC address",
            Self::BridgeMode => "Bridge mode",
            Self::BridgeMtu => "MTU",
            Self::FanOverlaySubnet => "Fan overlay subnet",
            Self::FanType => "Fan type",
            Self::FanUnderlaySubnet => "Fan underlay subnet",
            Self::DnsDomain => "DNS domain",
            Self::DnsMode => "DNS mode",
            Self::DnsNameservers => "DNS nameservers",
            Self::DnsSearch => "DNS search",
            Self::DnsZoneForward => "DNS forward zone",
            Self::DnsZoneReverseIpv4 => "DNS reverse zone (IPv4)",
            Self::DnsZoneReverseIpv6 => "DNS reverse zone (IPv6)",
            Self::Ipv4Address => "IPv4 address",
            Self::Ipv4Dhcp => "IPv4 DHCP",
            Self::Ipv4DhcpExpiry => "IPv4 DHCP expiry",
            Self::Ipv4DhcpGateway => "IPv4 DHCP gateway",
            Self::Ipv4DhcpRanges => "IPv4 DHCP ranges",
            Self::Ipv4Firewall => "IPv4 firewall",
            Self::Ipv4L3only => "IPv4 L3 only",
            Self::Ipv4Nat => "IPv4 NAT",
            Self::Ipv4NatAddress => "IPv4 NAT address",
            Self::Ipv4NatOrder => "IPv4 NAT order",
            Self::Ipv4OvnRanges => "IPv4 OVN ranges",
            Self::Ipv4Routes => "IPv4 routes",
            Self::Ipv4Routing => "IPv4 routing",
            Self::Ipv6Address => "IPv6 address",
            Self::Ipv6Dhcp => "IPv6 DHCP",
            Self::Ipv6DhcpExpiry => "IPv6 DHCP expiry",
            Self::Ipv6DhcpRanges => "IPv6 DHCP ranges",
            Self::Ipv6DhcpStateful => "IPv6 DHCP stateful",
            Self::Ipv6Firewall => "IPv6 firewall",
            Self::Ipv6L3only => "IPv6 L3 only",
            Self::Ipv6Nat => "IPv6 NAT",
            Self::Ipv6NatAddress => "IPv6 NAT address",
            Self::Ipv6NatOrder => "IPv6 NAT order",
            Self::Ipv6OvnRanges => "IPv6 OVN ranges",
            Self::Ipv6OvnRoutes => "IPv6 OVN routes",
            Self::Ipv6OvnRouting => "IPv6 OVN routing",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Self::Type => FieldKind::Choice(&[
                "bridge-standard",
                "bridge-fan",
                "ovn",
                "macvlan",
                "sriov",
                "physical",
            ]),
            Self::BridgeDriver => FieldKind::Choice(&["native", "openvswitch"]),
            Self::BridgeMode => FieldKind::Choice(&["standard", "fan"]),
            Self::FanType => FieldKind::Choice(&["vxlan", "ipip"]),
            Self::DnsMode => FieldKind::Choice(&["none", "managed", "dynamic"]),
            Self::Ipv4NatOrder | Self::Ipv6NatOrder => FieldKind::Choice(&["before", "after"]),
            Self::Ipv4Dhcp
            | Self::Ipv4Firewall
            | Self::Ipv4L3only
            | Self::Ipv4Nat
            | Self::Ipv4Routing
            | Self::Ipv6Dhcp
            | Self::Ipv6DhcpStateful
            | Self::Ipv6Firewall
            | Self::Ipv6L3only
            | Self::Ipv6Nat
            | Self::Ipv6OvnRouting => FieldKind::Toggle,
            _ => FieldKind::Text,
        }
    }
}

/// Form sections. Exactly one is active at a time.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Section {
    #[default]
    Details,
    Bridge,
    Dns,
    Ipv4,
    Ipv6,
    User,
    AdvancedOvn,
    Yaml,
}

const DETAILS_FIELDS: &[FieldId] = &[
    FieldId::Type,
    FieldId::Name,
    FieldId::Description,
    FieldId::Network,
    FieldId::Ipv4Address,
    FieldId::Ipv4Nat,
    FieldId::Ipv6Address,
    FieldId::Ipv6Nat,
];

const BRIDGE_FIELDS: &[FieldId] = &[
    FieldId::BridgeMtu,
    FieldId::BridgeHwaddr,
    FieldId::BridgeDriver,
    FieldId::BridgeExternalInterfaces,
    FieldId::FanType,
    FieldId::FanOverlaySubnet,
    FieldId::FanUnderlaySubnet,
];

const DNS_FIELDS: &[FieldId] = &[
    FieldId::DnsDomain,
    FieldId::DnsMode,
    FieldId::DnsNameservers,
    FieldId::DnsSearch,
    FieldId::DnsZoneForward,
    FieldId::DnsZoneReverseIpv4,
    FieldId::DnsZoneReverseIpv6,
];

const IPV4_FIELDS: &[FieldId] = &[
    FieldId::Ipv4Dhcp,
    FieldId::Ipv4DhcpExpiry,
    FieldId::Ipv4DhcpGateway,
    FieldId::Ipv4DhcpRanges,
    FieldId::Ipv4L3only,
    FieldId::Ipv4Firewall,
    FieldId::Ipv4NatAddress,
    FieldId::Ipv4NatOrder,
    FieldId::Ipv4OvnRanges,
    FieldId::Ipv4Routes,
    FieldId::Ipv4Routing,
];

const IPV6_FIELDS: &[FieldId] = &[
    FieldId::Ipv6Dhcp,
    FieldId::Ipv6DhcpExpiry,
    FieldId::Ipv6DhcpRanges,
    FieldId::Ipv6DhcpStateful,
    FieldId::Ipv6L3only,
    FieldId::Ipv6Firewall,
    FieldId::Ipv6NatAddress,
    FieldId::Ipv6NatOrder,
    FieldId::Ipv6OvnRanges,
    FieldId::Ipv6OvnRoutes,
    FieldId::Ipv6OvnRouting,
];

impl Section {
    /// Candidate fields of this section, in render order.
    ///
    /// `AdvancedOvn` is the union of the Bridge, DNS, IPv4 and IPv6
    /// groups (plus the user pairs, which are not typed fields).
    pub fn fields(self) -> Vec<FieldId> {
        match self {
            Self::Details => DETAILS_FIELDS.to_vec(),
            Self::Bridge => BRIDGE_FIELDS.to_vec(),
            Self::Dns => DNS_FIELDS.to_vec(),
            Self::Ipv4 => IPV4_FIELDS.to_vec(),
            Self::Ipv6 => IPV6_FIELDS.to_vec(),
            Self::AdvancedOvn => [BRIDGE_FIELDS, DNS_FIELDS, IPV4_FIELDS, IPV6_FIELDS].concat(),
            Self::User | Self::Yaml => Vec::new(),
        }
    }

    /// Whether the user key/value list renders in this section.
    pub fn shows_user_pairs(self) -> bool {
        matches!(self, Self::User | Self::AdvancedOvn)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Details => "Network details",
            Self::Bridge => "Bridge",
            Self::Dns => "DNS",
            Self::Ipv4 => "IPv4",
            Self::Ipv6 => "IPv6",
            Self::User => "User",
            Self::AdvancedOvn => "Advanced OVN",
            Self::Yaml => "YAML configuration",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_snake_case() {
        assert_eq!(FieldId::Ipv4DhcpRanges.to_string(), "ipv4_dhcp_ranges");
        assert_eq!(FieldId::Ipv6L3only.as_ref(), "ipv6_l3only");
        assert_eq!(
            "dns_zone_reverse_ipv4".parse::<FieldId>().unwrap(),
            FieldId::DnsZoneReverseIpv4
        );
    }

    #[test]
    fn config_keys_round_trip() {
        for field in FieldId::iter() {
            if let Some(key) = field.config_key() {
                assert_eq!(FieldId::from_config_key(key), Some(field), "{key}");
            }
        }
        assert_eq!(
            FieldId::from_config_key("ipv6.ovn.routing"),
            Some(FieldId::Ipv6OvnRouting)
        );
        assert_eq!(FieldId::from_config_key("ipv6.routing"), None);
        assert_eq!(FieldId::from_config_key("user.owner"), None);
    }

    #[test]
    fn every_config_field_has_a_home_section() {
        let placed: Vec<FieldId> = [Section::Details, Section::AdvancedOvn]
            .into_iter()
            .flat_map(Section::fields)
            .collect();
        for field in FieldId::iter() {
            // bridge_mode follows the type selector and is never edited directly
            if field == FieldId::BridgeMode {
                continue;
            }
            assert!(placed.contains(&field), "{field} not rendered anywhere");
        }
    }
}
