// ── Form reducer ──
//
// The only way form values change. Each edit is applied to an owned
// `NetworkFormValues` and the next state returned; derivation (what is
// visible) lives separately in `visibility`.

use tracing::trace;

use super::field::FieldId;
use super::values::{NetworkFormValues, UserPair};
use super::visibility;
use crate::model::NetworkType;

/// A single user edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEdit {
    /// Set or clear a field. Empty strings clear.
    Set(FieldId, Option<String>),
    /// Select a network type, updating `bridge_mode` to match.
    SetType(NetworkType),
    SetName(String),
    SetDescription(String),
    AddUser { key: String, value: String },
    SetUser { index: usize, key: String, value: String },
    RemoveUser(usize),
}

/// Apply `edit` to `values`.
///
/// Edits to disabled fields (read-only forms, name/type after creation)
/// are ignored, as are edits addressing a user pair that does not exist.
pub fn reduce(mut values: NetworkFormValues, edit: FormEdit) -> NetworkFormValues {
    trace!(?edit, "form edit");

    if let Some(field) = edit_target(&edit) {
        if !visibility::is_enabled(field, &values) {
            return values;
        }
    } else if values.read_only {
        return values;
    }

    match edit {
        FormEdit::Set(FieldId::Name, value) => values.name = value.unwrap_or_default(),
        FormEdit::Set(FieldId::Description, value) => {
            values.description = value.unwrap_or_default();
        }
        FormEdit::Set(FieldId::Type, value) => {
            if let Some(network_type) = value.and_then(|v| v.parse().ok()) {
                values = select_type(values, network_type);
            }
        }
        FormEdit::Set(field, value) => match value.filter(|v| !v.is_empty()) {
            Some(v) => {
                values.fields.insert(field, v);
            }
            None => {
                values.fields.remove(&field);
            }
        },
        FormEdit::SetType(network_type) => values = select_type(values, network_type),
        FormEdit::SetName(name) => values.name = name,
        FormEdit::SetDescription(description) => values.description = description,
        FormEdit::AddUser { key, value } => values.user.push(UserPair { key, value }),
        FormEdit::SetUser { index, key, value } => {
            if let Some(pair) = values.user.get_mut(index) {
                *pair = UserPair { key, value };
            }
        }
        FormEdit::RemoveUser(index) => {
            if index < values.user.len() {
                values.user.remove(index);
            }
        }
    }

    values
}

fn edit_target(edit: &FormEdit) -> Option<FieldId> {
    match edit {
        FormEdit::Set(field, _) => Some(*field),
        FormEdit::SetType(_) => Some(FieldId::Type),
        FormEdit::SetName(_) => Some(FieldId::Name),
        FormEdit::SetDescription(_) => Some(FieldId::Description),
        FormEdit::AddUser { .. } | FormEdit::SetUser { .. } | FormEdit::RemoveUser(_) => None,
    }
}

/// Type selection side effects on `bridge_mode`.
fn select_type(mut values: NetworkFormValues, network_type: NetworkType) -> NetworkFormValues {
    match network_type {
        NetworkType::BridgeStandard => {
            values.fields.insert(FieldId::BridgeMode, "standard".into());
        }
        NetworkType::BridgeFan => {
            values.fields.insert(FieldId::BridgeMode, "fan".into());
        }
        NetworkType::Ovn => {
            values.fields.remove(&FieldId::BridgeMode);
        }
        // Not selectable; the type is recorded and validation rejects it.
        NetworkType::Macvlan | NetworkType::Sriov | NetworkType::Physical => {}
    }
    values.network_type = network_type;
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn apply(values: NetworkFormValues, edits: Vec<FormEdit>) -> NetworkFormValues {
        edits.into_iter().fold(values, reduce)
    }

    #[test]
    fn bridge_fan_sets_fan_mode() {
        let values = reduce(
            NetworkFormValues::for_create(),
            FormEdit::SetType(NetworkType::BridgeFan),
        );
        assert_eq!(values.bridge_mode(), Some("fan"));
        assert_eq!(values.network_type, NetworkType::BridgeFan);
    }

    #[test]
    fn ovn_clears_bridge_mode() {
        let values = apply(
            NetworkFormValues::for_create(),
            vec![
                FormEdit::SetType(NetworkType::BridgeFan),
                FormEdit::SetType(NetworkType::Ovn),
            ],
        );
        assert_eq!(values.bridge_mode(), None);
    }

    #[test]
    fn bridge_standard_sets_standard_mode() {
        let values = apply(
            NetworkFormValues::for_create(),
            vec![FormEdit::Set(FieldId::Type, Some("bridge-standard".into()))],
        );
        assert_eq!(values.bridge_mode(), Some("standard"));
    }

    #[test]
    fn empty_string_clears_field() {
        let values = apply(
            NetworkFormValues::for_create(),
            vec![
                FormEdit::Set(FieldId::Ipv4Address, Some("10.0.0.1/24".into())),
                FormEdit::Set(FieldId::Ipv4Address, Some(String::new())),
            ],
        );
        assert_eq!(values.get(FieldId::Ipv4Address), None);
    }

    #[test]
    fn name_and_type_are_frozen_after_creation() {
        let editing = NetworkFormValues {
            name: "lxdbr0".into(),
            ..NetworkFormValues::default()
        };
        let values = apply(
            editing.clone(),
            vec![
                FormEdit::SetName("renamed".into()),
                FormEdit::SetType(NetworkType::Ovn),
            ],
        );
        assert_eq!(values, editing);
    }

    #[test]
    fn read_only_ignores_every_edit() {
        let frozen = NetworkFormValues {
            read_only: true,
            is_creating: true,
            ..NetworkFormValues::default()
        };
        let values = apply(
            frozen.clone(),
            vec![
                FormEdit::Set(FieldId::BridgeMtu, Some("1400".into())),
                FormEdit::AddUser {
                    key: "a".into(),
                    value: "1".into(),
                },
            ],
        );
        assert_eq!(values, frozen);
    }

    #[test]
    fn user_pairs_keep_duplicates_and_order() {
        let values = apply(
            NetworkFormValues::for_create(),
            vec![
                FormEdit::AddUser {
                    key: "a".into(),
                    value: "1".into(),
                },
                FormEdit::AddUser {
                    key: "a".into(),
                    value: "2".into(),
                },
                FormEdit::AddUser {
                    key: "b".into(),
                    value: "3".into(),
                },
                FormEdit::SetUser {
                    index: 2,
                    key: "c".into(),
                    value: "4".into(),
                },
                FormEdit::RemoveUser(9),
            ],
        );
        assert_eq!(
            values.user,
            vec![
                UserPair::new("a", "1"),
                UserPair::new("a", "2"),
                UserPair::new("c", "4"),
            ]
        );

        let values = reduce(values, FormEdit::RemoveUser(0));
        assert_eq!(values.user.len(), 2);
        assert_eq!(values.user[0], UserPair::new("a", "2"));
    }
}
