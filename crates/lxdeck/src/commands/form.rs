//! Interactive network form: prompts for each field the form currently
//! offers, recomputing visibility after every answer.

use std::collections::BTreeSet;

use dialoguer::{Confirm, Input, Select};

use lxdeck_core::{
    FieldId, FieldState, FormEdit, FormRender, FormSession, Section, ServerSettings,
    TypeOption,
};

use crate::error::CliError;

use super::util;

/// Sections walked in order. Advanced-OVN repeats these, User is
/// handled separately and YAML is not interactive.
const WALK_SECTIONS: [Section; 5] = [
    Section::Details,
    Section::Bridge,
    Section::Dns,
    Section::Ipv4,
    Section::Ipv6,
];

const UNSET: &str = "(unset)";

fn prompt_err(e: dialoguer::Error) -> CliError {
    CliError::Io(std::io::Error::other(e))
}

pub fn walk(session: &mut FormSession, settings: &ServerSettings) -> Result<(), CliError> {
    for section in WALK_SECTIONS {
        session.set_section(section)?;
        let mut asked = BTreeSet::new();
        loop {
            let FormRender::Ready {
                fields,
                type_options,
            } = session.render(Some(settings))
            else {
                break;
            };
            let Some(state) = fields
                .into_iter()
                .find(|s| s.visible && s.enabled && !asked.contains(&s.field))
            else {
                break;
            };
            asked.insert(state.field);
            let current = session.values().get(state.field).map(str::to_owned);
            let value = prompt_field(state, current, &type_options)?;
            util::apply_field(session, state.field, value)?;
        }
    }

    prompt_user_pairs(session)?;
    session.set_section(Section::Details)?;
    Ok(())
}

fn label(state: FieldState) -> String {
    if state.required {
        format!("{} *", state.field.label())
    } else {
        state.field.label().to_owned()
    }
}

fn prompt_field(
    state: FieldState,
    current: Option<String>,
    type_options: &[TypeOption],
) -> Result<Option<String>, CliError> {
    if state.field == FieldId::Type {
        return prompt_type(state, current.as_deref(), type_options);
    }

    match state.field.kind().choices() {
        None => {
            let value: String = Input::new()
                .with_prompt(label(state))
                .with_initial_text(current.unwrap_or_default())
                .allow_empty(!state.required)
                .interact_text()
                .map_err(prompt_err)?;
            Ok(Some(value))
        }
        Some(choices) => {
            let mut items = vec![UNSET];
            items.extend_from_slice(choices);
            let default = current
                .as_deref()
                .and_then(|c| items.iter().position(|i| *i == c))
                .unwrap_or(0);
            let picked = Select::new()
                .with_prompt(label(state))
                .items(&items)
                .default(default)
                .interact()
                .map_err(prompt_err)?;
            Ok(items
                .get(picked)
                .filter(|v| **v != UNSET)
                .map(|v| (*v).to_owned()))
        }
    }
}

fn prompt_type(
    state: FieldState,
    current: Option<&str>,
    type_options: &[TypeOption],
) -> Result<Option<String>, CliError> {
    let available: Vec<&TypeOption> = type_options.iter().filter(|o| o.enabled).collect();
    let labels: Vec<&str> = available.iter().map(|o| o.label).collect();
    let default = available
        .iter()
        .position(|o| Some(o.network_type.as_ref()) == current)
        .unwrap_or(0);
    let picked = Select::new()
        .with_prompt(label(state))
        .items(&labels)
        .default(default)
        .interact()
        .map_err(prompt_err)?;
    Ok(available.get(picked).map(|o| o.network_type.to_string()))
}

fn prompt_user_pairs(session: &mut FormSession) -> Result<(), CliError> {
    if session.values().read_only {
        return Ok(());
    }
    while Confirm::new()
        .with_prompt("Add a user.* metadata key?")
        .default(false)
        .interact()
        .map_err(prompt_err)?
    {
        let key: String = Input::new()
            .with_prompt("Key (without user.)")
            .interact_text()
            .map_err(prompt_err)?;
        let value: String = Input::new()
            .with_prompt("Value")
            .allow_empty(true)
            .interact_text()
            .map_err(prompt_err)?;
        session.edit(FormEdit::AddUser { key, value });
    }
    Ok(())
}
