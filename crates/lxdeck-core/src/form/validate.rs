// ── Form validation ──
//
// Field-level checks shown inline next to the offending input. Never
// fatal: the caller decides whether to block submission.

use serde::Serialize;

use super::field::FieldId;
use super::values::NetworkFormValues;
use super::visibility::type_options;
use crate::model::{NetworkType, ServerSettings};

/// Kernel interface names are limited to 15 bytes.
pub const MAX_NAME_LEN: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: FieldId,
    pub message: String,
}

impl FieldError {
    fn new(field: FieldId, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check `values`, returning one error per failing field.
///
/// With `settings`, the selected type must also be enabled in the
/// selector for this server.
pub fn validate(values: &NetworkFormValues, settings: Option<&ServerSettings>) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if let Some(message) = check_name(&values.name) {
        errors.push(FieldError::new(FieldId::Name, message));
    }

    if !values.network_type.is_actionable() {
        errors.push(FieldError::new(
            FieldId::Type,
            format!("{} networks are not supported", values.network_type.label()),
        ));
    } else if let Some(settings) = settings {
        let available = type_options(settings)
            .into_iter()
            .any(|o| o.network_type == values.network_type && o.enabled);
        if !available {
            errors.push(FieldError::new(
                FieldId::Type,
                format!(
                    "{} networks are not available on this server",
                    values.network_type.label()
                ),
            ));
        }
    }

    if values.network_type == NetworkType::Ovn && values.get(FieldId::Network).is_none() {
        errors.push(FieldError::new(
            FieldId::Network,
            "An uplink network is required for OVN",
        ));
    }

    errors
}

fn check_name(name: &str) -> Option<String> {
    if name.is_empty() {
        return Some("This field is required".into());
    }
    if name.len() > MAX_NAME_LEN {
        return Some(format!("Name must be at most {MAX_NAME_LEN} characters"));
    }
    if name.starts_with('-') || name.starts_with(|c: char| c.is_ascii_digit()) {
        return Some("Name must not start with a digit or a dash".into());
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Some("Name may only contain letters, numbers, dashes and underscores".into());
    }
    None
}
