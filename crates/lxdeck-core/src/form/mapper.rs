// ── Form ↔ remote model mapping ──
//
// `to_remote_model` is total: every set field is copied to its dotted
// key, unset fields vanish. Hiding fields is the visibility engine's
// concern, so values that are set but hidden are still copied.

use std::collections::BTreeMap;

use tracing::debug;

use super::field::FieldId;
use super::values::{NetworkFormValues, UserPair};
use crate::error::CoreError;
use crate::model::{NetworkType, RemoteNetworkModel};

/// Prefix of free-form metadata keys.
pub const USER_PREFIX: &str = "user.";

/// Flatten form values into the model the daemon accepts.
///
/// Keys carried over from an edited network go in first. User pairs are
/// written in order, so when two share a key the later value is the one
/// that survives.
pub fn to_remote_model(values: &NetworkFormValues) -> RemoteNetworkModel {
    let mut config = values.extra.clone();

    for (field, value) in &values.fields {
        if let Some(key) = field.config_key() {
            config.insert(key.to_owned(), value.clone());
        }
    }

    for UserPair { key, value } in &values.user {
        config.insert(format!("{USER_PREFIX}{key}"), value.clone());
    }

    RemoteNetworkModel {
        name: values.name.clone(),
        description: values.description.clone(),
        network_type: values.network_type.remote_type().to_owned(),
        config,
    }
}

/// Rebuild form values from a model, e.g. when editing an existing network.
///
/// `bridge` becomes bridge-fan when `bridge.mode` is `fan` and
/// bridge-standard otherwise. `user.*` keys become user pairs in key
/// order; keys the form does not know are kept verbatim in `extra` so a
/// full-config PUT does not erase them.
pub fn from_remote_model(model: &RemoteNetworkModel) -> Result<NetworkFormValues, CoreError> {
    let network_type = match model.network_type.as_str() {
        "bridge" => {
            if model.config.get("bridge.mode").map(String::as_str) == Some("fan") {
                NetworkType::BridgeFan
            } else {
                NetworkType::BridgeStandard
            }
        }
        other => other
            .parse::<NetworkType>()
            .ok()
            .filter(|t| !t.is_bridge())
            .ok_or_else(|| CoreError::UnsupportedType {
                network_type: other.to_owned(),
            })?,
    };

    let mut fields = BTreeMap::new();
    let mut user = Vec::new();
    let mut extra = BTreeMap::new();

    for (key, value) in &model.config {
        if let Some(user_key) = key.strip_prefix(USER_PREFIX) {
            user.push(UserPair::new(user_key, value.clone()));
        } else if let Some(field) = FieldId::from_config_key(key) {
            fields.insert(field, value.clone());
        } else {
            debug!(key, "config key has no form field; carried over");
            extra.insert(key.clone(), value.clone());
        }
    }

    Ok(NetworkFormValues {
        name: model.name.clone(),
        description: model.description.clone(),
        network_type,
        fields,
        user,
        extra,
        read_only: false,
        is_creating: false,
    })
}
