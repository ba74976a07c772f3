//! Shared helpers for command handlers.

use std::io::IsTerminal;

use tracing::warn;

use lxdeck_core::{
    Action, ActionButton, ActionOutcome, Confirmation, Console, FieldId, FormEdit, FormSession,
    Modifiers, Trigger, UserPair,
};

use crate::cli::{FormArgs, GlobalOpts};
use crate::error::{CliError, core_exit_code};
use crate::output;

/// Ask the operator to confirm a gated action.
///
/// Refuses instead of blocking when stdin is not a terminal.
pub fn confirm(confirmation: &Confirmation) -> Result<bool, CliError> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: confirmation.title.clone(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(format!("{} {}", confirmation.message, confirmation.confirm_label))
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Drive one action button through click, confirmation and run.
///
/// `--yes` is the modifier bypass: the action fires without a prompt.
pub async fn run_action<A: Action>(
    console: &Console,
    button: &mut ActionButton<A>,
    subject: &str,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let label = button.action().label();
    if !button.is_enabled() {
        return Err(CliError::Precondition {
            action: label.to_lowercase(),
            subject: subject.into(),
            reason: "not allowed in its current state".into(),
        });
    }

    let modifiers = if global.yes {
        Modifiers::SHIFT
    } else {
        Modifiers::NONE
    };

    match button.click(modifiers) {
        Trigger::Fire => {}
        Trigger::Prompt(confirmation) => {
            if !confirm(&confirmation)? {
                button.cancel();
                if !global.quiet {
                    eprintln!("Cancelled");
                }
                return Ok(());
            }
            if button.confirm() != Trigger::Fire {
                return Ok(());
            }
        }
        Trigger::Ignored => return Ok(()),
    }

    let bar = output::spinner(format!("{label} {subject}"), global);
    let outcome = button
        .run(console, console.notifications(), console)
        .await;
    bar.finish_and_clear();

    let notification = console.notifications().current();
    output::print_notification(notification.as_ref(), global);

    match outcome {
        ActionOutcome::Succeeded | ActionOutcome::Skipped(_) => Ok(()),
        ActionOutcome::Failed(err) => {
            let exit = core_exit_code(&err);
            let (title, detail) = notification.map_or_else(
                || (label.to_owned(), err.detail()),
                |n| (n.title, n.message),
            );
            Err(CliError::ActionFailed {
                title,
                detail,
                exit,
            })
        }
    }
}

/// Split `KEY=VALUE`.
pub fn parse_pair(raw: &str, flag: &str) -> Result<(String, String), CliError> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_owned(), v.to_owned()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| CliError::Validation {
            field: flag.into(),
            reason: format!("expected KEY=VALUE, got '{raw}'"),
        })
}

/// Accept either a form id (`ipv4_address`) or a config key (`ipv4.address`).
pub fn parse_field(raw: &str) -> Result<FieldId, CliError> {
    FieldId::from_config_key(raw)
        .or_else(|| raw.parse().ok())
        .ok_or_else(|| CliError::Validation {
            field: "field".into(),
            reason: format!(
                "unknown field '{raw}'. Run: lxdeck networks fields to see the form's fields"
            ),
        })
}

/// Build the edit for one field, routing the top-level fields.
pub fn field_edit(field: FieldId, value: Option<String>) -> Result<FormEdit, CliError> {
    Ok(match field {
        FieldId::Name => FormEdit::SetName(value.unwrap_or_default()),
        FieldId::Description => FormEdit::SetDescription(value.unwrap_or_default()),
        FieldId::Type => {
            let raw = value.unwrap_or_default();
            let network_type = raw.parse().map_err(|_| CliError::Validation {
                field: "type".into(),
                reason: format!("unknown network type '{raw}'"),
            })?;
            FormEdit::SetType(network_type)
        }
        other => FormEdit::Set(other, value),
    })
}

/// Apply one field edit and warn when the form refused it.
pub fn apply_field(
    session: &mut FormSession,
    field: FieldId,
    value: Option<String>,
) -> Result<(), CliError> {
    let expected = value.clone().filter(|v| !v.is_empty());
    session.edit(field_edit(field, value)?);
    if field != FieldId::Type && session.values().get(field).map(str::to_owned) != expected {
        warn!(field = %field, "field is not editable for this network; ignored");
    }
    Ok(())
}

/// Apply `--set` and `--user` flags in order.
pub fn apply_form_args(session: &mut FormSession, form: &FormArgs) -> Result<(), CliError> {
    for raw in &form.set {
        let (key, value) = parse_pair(raw, "set")?;
        apply_field(session, parse_field(&key)?, Some(value))?;
    }
    for raw in &form.user {
        let (key, value) = parse_pair(raw, "user")?;
        let before = session.values().user.len();
        session.edit(FormEdit::AddUser { key, value });
        if session.values().user.len() == before {
            warn!("form is read-only; user pair ignored");
        }
    }
    Ok(())
}

/// Render `user` pairs as `key=value` lines.
pub fn format_user_pairs(pairs: &[UserPair]) -> Vec<String> {
    pairs
        .iter()
        .map(|UserPair { key, value }| format!("user.{key}={value}"))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn pairs_split_on_first_equals() {
        assert_eq!(
            parse_pair("dns.search=a=b", "set").unwrap(),
            ("dns.search".to_owned(), "a=b".to_owned())
        );
        assert!(parse_pair("novalue", "set").is_err());
        assert!(parse_pair("=x", "set").is_err());
    }

    #[test]
    fn fields_by_key_or_id() {
        assert_eq!(parse_field("ipv4.address").unwrap(), FieldId::Ipv4Address);
        assert_eq!(parse_field("ipv4_address").unwrap(), FieldId::Ipv4Address);
        assert!(parse_field("ipv9.address").is_err());
    }
}
