// ── Network form values ──

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::FieldId;
use crate::model::NetworkType;

/// One free-form `user.*` entry. Keys need not be unique in the form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPair {
    pub key: String,
    pub value: String,
}

impl UserPair {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Flat state of the network form.
///
/// Every config-backed field is optional and lives in `fields`; a field
/// that is absent is "unset" and vanishes from the remote model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkFormValues {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub network_type: NetworkType,
    #[serde(default)]
    pub fields: BTreeMap<FieldId, String>,
    #[serde(default)]
    pub user: Vec<UserPair>,
    /// Config keys the form has no field for, written back unchanged.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
    /// Every field renders disabled.
    #[serde(default)]
    pub read_only: bool,
    /// Name and type are only editable while creating.
    #[serde(default)]
    pub is_creating: bool,
}

impl NetworkFormValues {
    /// Blank form for creating a network.
    pub fn for_create() -> Self {
        Self {
            is_creating: true,
            ..Self::default()
        }
    }

    /// Current value of `field`, if set.
    ///
    /// `name` and `description` read as unset while empty; `type` is
    /// always set.
    pub fn get(&self, field: FieldId) -> Option<&str> {
        match field {
            FieldId::Name => Some(self.name.as_str()).filter(|s| !s.is_empty()),
            FieldId::Description => Some(self.description.as_str()).filter(|s| !s.is_empty()),
            FieldId::Type => Some(self.network_type.as_ref()),
            _ => self.fields.get(&field).map(String::as_str),
        }
    }

    /// `true` when `field` holds exactly `expected`.
    pub fn is(&self, field: FieldId, expected: &str) -> bool {
        self.get(field) == Some(expected)
    }

    pub fn bridge_mode(&self) -> Option<&str> {
        self.get(FieldId::BridgeMode)
    }
}
