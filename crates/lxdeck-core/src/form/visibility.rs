// ── Field visibility engine ──
//
// Pure projection from (section, values, settings) to the declarative
// field records a front end renders. Recomputed on every render; nothing
// here holds state.

use serde::Serialize;
use strum::IntoEnumIterator;

use super::field::{FieldId, Section};
use super::values::NetworkFormValues;
use crate::model::{NetworkType, ServerSettings};

/// Render flags for a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldState {
    pub field: FieldId,
    pub visible: bool,
    pub enabled: bool,
    pub required: bool,
}

/// One entry of the type selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TypeOption {
    pub network_type: NetworkType,
    pub label: &'static str,
    pub enabled: bool,
}

/// What the form should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormRender {
    /// Server settings are not loaded yet; draw a loading indicator.
    Loading,
    Ready {
        fields: Vec<FieldState>,
        type_options: Vec<TypeOption>,
    },
}

/// Full projection for the active section.
///
/// Without settings the type selector cannot be built, so the whole
/// form waits rather than rendering a partial or erroring.
pub fn render(
    section: Section,
    values: &NetworkFormValues,
    settings: Option<&ServerSettings>,
) -> FormRender {
    match settings {
        None => FormRender::Loading,
        Some(settings) => FormRender::Ready {
            fields: field_states(section, values),
            type_options: type_options(settings),
        },
    }
}

/// Flags for every candidate field of `section`, in render order.
pub fn field_states(section: Section, values: &NetworkFormValues) -> Vec<FieldState> {
    section
        .fields()
        .into_iter()
        .map(|field| FieldState {
            field,
            visible: is_visible(field, values),
            enabled: is_enabled(field, values),
            required: is_required(field, values),
        })
        .collect()
}

/// Just the fields that render in `section`.
pub fn visible_fields(section: Section, values: &NetworkFormValues) -> Vec<FieldId> {
    field_states(section, values)
        .into_iter()
        .filter(|s| s.visible)
        .map(|s| s.field)
        .collect()
}

/// The type selector. Macvlan, SR-IOV and physical are listed but never
/// selectable; fan needs an Ubuntu host and OVN a northbound connection.
pub fn type_options(settings: &ServerSettings) -> Vec<TypeOption> {
    NetworkType::iter()
        .map(|network_type| TypeOption {
            network_type,
            label: network_type.label(),
            enabled: match network_type {
                NetworkType::BridgeStandard => true,
                NetworkType::BridgeFan => settings.has_fan(),
                NetworkType::Ovn => settings.has_ovn(),
                NetworkType::Macvlan | NetworkType::Sriov | NetworkType::Physical => false,
            },
        })
        .collect()
}

// ── Rules ────────────────────────────────────────────────────────────

fn address_enabled(values: &NetworkFormValues, address: FieldId) -> bool {
    !values.is(address, "none")
}

fn toggled(values: &NetworkFormValues, field: FieldId) -> bool {
    values.is(field, "true")
}

pub fn is_visible(field: FieldId, values: &NetworkFormValues) -> bool {
    let ovn = values.network_type == NetworkType::Ovn;
    let bridge = values.network_type.is_bridge();
    let fan = values.is(FieldId::BridgeMode, "fan");
    let v4 = address_enabled(values, FieldId::Ipv4Address);
    let v6 = address_enabled(values, FieldId::Ipv6Address);

    match field {
        FieldId::Name
        | FieldId::Description
        | FieldId::Type
        | FieldId::BridgeHwaddr
        | FieldId::BridgeMtu
        | FieldId::DnsDomain
        | FieldId::DnsSearch
        | FieldId::DnsZoneForward
        | FieldId::DnsZoneReverseIpv4
        | FieldId::DnsZoneReverseIpv6 => true,

        // Follows the type selector.
        FieldId::BridgeMode => false,

        FieldId::Network
        | FieldId::DnsNameservers
        | FieldId::Ipv4L3only
        | FieldId::Ipv6L3only => ovn,

        FieldId::BridgeDriver | FieldId::BridgeExternalInterfaces | FieldId::DnsMode => bridge,

        FieldId::FanType | FieldId::FanOverlaySubnet | FieldId::FanUnderlaySubnet => {
            bridge && fan
        }

        FieldId::Ipv4Address | FieldId::Ipv6Address => !fan,

        // IPv4
        FieldId::Ipv4Nat | FieldId::Ipv4Dhcp => v4,
        FieldId::Ipv4NatAddress => v4 && toggled(values, FieldId::Ipv4Nat),
        FieldId::Ipv4NatOrder => v4 && toggled(values, FieldId::Ipv4Nat) && !ovn,
        FieldId::Ipv4DhcpExpiry | FieldId::Ipv4DhcpGateway | FieldId::Ipv4DhcpRanges => {
            !ovn && toggled(values, FieldId::Ipv4Dhcp)
        }
        FieldId::Ipv4Firewall
        | FieldId::Ipv4Routing
        | FieldId::Ipv4OvnRanges
        | FieldId::Ipv4Routes => !ovn && v4,

        // IPv6
        FieldId::Ipv6Nat | FieldId::Ipv6Dhcp => v6,
        FieldId::Ipv6NatAddress => v6 && toggled(values, FieldId::Ipv6Nat),
        FieldId::Ipv6NatOrder => v6 && toggled(values, FieldId::Ipv6Nat) && !ovn,
        FieldId::Ipv6DhcpExpiry | FieldId::Ipv6DhcpRanges => {
            !ovn && toggled(values, FieldId::Ipv6Dhcp)
        }
        FieldId::Ipv6DhcpStateful => toggled(values, FieldId::Ipv6Dhcp),
        FieldId::Ipv6Firewall => !ovn && v6,
        // Uplink group renders when IPv6 is off, the inverse of IPv4.
        FieldId::Ipv6OvnRanges | FieldId::Ipv6OvnRoutes | FieldId::Ipv6OvnRouting => {
            !ovn && !v6
        }
    }
}

pub fn is_enabled(field: FieldId, values: &NetworkFormValues) -> bool {
    if values.read_only {
        return false;
    }
    match field {
        FieldId::Name | FieldId::Type => values.is_creating,
        FieldId::DnsSearch => !values.is(FieldId::DnsMode, "none"),
        _ => true,
    }
}

pub fn is_required(field: FieldId, values: &NetworkFormValues) -> bool {
    match field {
        FieldId::Name | FieldId::Type => true,
        FieldId::Network => values.network_type == NetworkType::Ovn,
        _ => false,
    }
}
