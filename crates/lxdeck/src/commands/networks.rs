//! Network command handlers.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tabled::Tabled;

use lxdeck_core::{
    Action, ActionButton, Console, DeleteNetwork, FieldState, FormEdit, FormRender, FormSession,
    Network, NetworkFormValues, RemoteNetworkModel, SaveMode, SaveNetwork, Section,
    ServerSettings, TypeOption,
};

use crate::cli::{FormArgs, GlobalOpts, NetworksArgs, NetworksCommand};
use crate::error::CliError;
use crate::output;

use super::{form, util};

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct NetworkRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    network_type: String,
    #[tabled(rename = "Managed")]
    managed: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "IPv4")]
    ipv4: String,
    #[tabled(rename = "IPv6")]
    ipv6: String,
    #[tabled(rename = "Used by")]
    used_by: usize,
}

impl From<&Arc<Network>> for NetworkRow {
    fn from(n: &Arc<Network>) -> Self {
        let config = |key: &str| n.config.get(key).cloned().unwrap_or_default();
        Self {
            name: n.name.clone(),
            network_type: n.network_type.clone(),
            managed: if n.managed { "yes" } else { "no" }.into(),
            status: n.status.clone(),
            ipv4: config("ipv4.address"),
            ipv6: config("ipv6.address"),
            used_by: n.used_by.len(),
        }
    }
}

fn detail(n: &Network) -> String {
    let mut lines = vec![
        format!("Name:        {}", n.name),
        format!("Type:        {}", n.network_type),
        format!("Managed:     {}", n.managed),
        format!("Status:      {}", n.status),
        format!(
            "Description: {}",
            if n.description.is_empty() { "-" } else { &n.description }
        ),
        format!("Used by:     {}", n.used_by.len()),
    ];
    if !n.config.is_empty() {
        lines.push("Config:".into());
        lines.extend(n.config.iter().map(|(k, v)| format!("  {k} = {v}")));
    }
    lines.join("\n")
}

/// One row of `networks fields`.
#[derive(Clone, Tabled, Serialize)]
struct FieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Visible")]
    visible: bool,
    #[tabled(rename = "Enabled")]
    enabled: bool,
    #[tabled(rename = "Required")]
    required: bool,
    #[tabled(rename = "Value")]
    value: String,
}

impl FieldRow {
    fn new(state: FieldState, values: &NetworkFormValues) -> Self {
        Self {
            field: state.field.to_string(),
            key: state.field.config_key().unwrap_or("-").to_owned(),
            visible: state.visible,
            enabled: state.enabled,
            required: state.required,
            value: values.get(state.field).unwrap_or_default().to_owned(),
        }
    }
}

#[derive(Tabled)]
struct TypeRow {
    #[tabled(rename = "Type")]
    network_type: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Available")]
    available: String,
}

impl From<&TypeOption> for TypeRow {
    fn from(o: &TypeOption) -> Self {
        Self {
            network_type: o.network_type.to_string(),
            label: o.label.to_owned(),
            available: if o.enabled { "yes" } else { "no" }.into(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: NetworksArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        NetworksCommand::List => {
            let snap = console.networks().await?;
            let out = output::render_list(
                &global.output,
                &snap,
                |n| NetworkRow::from(n),
                |n| n.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NetworksCommand::Get { name } => {
            let network = console.network(&name).await?;
            let out = output::render_single(&global.output, &network, detail, |n| n.name.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        NetworksCommand::Create {
            name,
            network_type,
            description,
            form,
            from_yaml,
            interactive,
        } => {
            let settings = console.settings().await?;
            let mut session = FormSession::new(NetworkFormValues::for_create());
            if let Some(path) = from_yaml {
                load_yaml(&mut session, &path)?;
            } else {
                session.edit(FormEdit::SetType(network_type));
                if let Some(name) = name {
                    session.edit(FormEdit::SetName(name));
                }
                if let Some(description) = description {
                    session.edit(FormEdit::SetDescription(description));
                }
                util::apply_form_args(&mut session, &form)?;
                if interactive {
                    form::walk(&mut session, &settings)?;
                }
            }
            save(console, &session, &settings, SaveMode::Create, global).await
        }

        NetworksCommand::Edit {
            name,
            description,
            form,
            unset,
            from_yaml,
            interactive,
        } => {
            let settings = console.settings().await?;
            let mut session = console.edit_network(&name).await?;
            if session.values().read_only {
                return Err(CliError::Precondition {
                    action: "edit".into(),
                    subject: format!("network {name}"),
                    reason: "it is not managed by LXD".into(),
                });
            }
            edit_session(&mut session, description, &form, &unset, from_yaml)?;
            if interactive {
                form::walk(&mut session, &settings)?;
            }
            save(console, &session, &settings, SaveMode::Update, global).await
        }

        NetworksCommand::Delete { name } => {
            let network = console.network(&name).await?;
            let mut button = ActionButton::new(DeleteNetwork::new(&network));
            if !button.action().is_allowed() {
                let reason = if network.managed {
                    format!("it is used by {} resource(s)", network.used_by.len())
                } else {
                    "it is not managed by LXD".into()
                };
                return Err(CliError::Precondition {
                    action: "delete".into(),
                    subject: format!("network {name}"),
                    reason,
                });
            }
            util::run_action(console, &mut button, &format!("network {name}"), global).await
        }

        NetworksCommand::Fields {
            network,
            network_type,
            section,
            form,
        } => {
            let settings = console.settings().await?;
            let mut session = match network {
                Some(name) => console.edit_network(&name).await?,
                None => {
                    let mut session = FormSession::new(NetworkFormValues::for_create());
                    session.edit(FormEdit::SetType(network_type));
                    session
                }
            };
            util::apply_form_args(&mut session, &form)?;
            session.set_section(section)?;
            print_section(&session, &settings, global)
        }

        NetworksCommand::Types => {
            let settings = console.settings().await?;
            let options = lxdeck_core::form::type_options(&settings);
            let out = output::render_list(
                &global.output,
                &options,
                |o| TypeRow::from(o),
                |o| o.network_type.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

fn load_yaml(session: &mut FormSession, path: &Path) -> Result<(), CliError> {
    let text = std::fs::read_to_string(path)?;
    session.set_section(Section::Yaml)?;
    session.set_yaml(text);
    session.apply_yaml()?;
    Ok(())
}

fn edit_session(
    session: &mut FormSession,
    description: Option<String>,
    form: &FormArgs,
    unset: &[String],
    from_yaml: Option<PathBuf>,
) -> Result<(), CliError> {
    if let Some(path) = from_yaml {
        return load_yaml(session, &path);
    }
    if let Some(description) = description {
        session.edit(FormEdit::SetDescription(description));
    }
    util::apply_form_args(session, form)?;
    for raw in unset {
        util::apply_field(session, util::parse_field(raw)?, None)?;
    }
    Ok(())
}

/// Validate the form and return the model to submit.
fn validated_model(
    session: &FormSession,
    settings: &ServerSettings,
) -> Result<RemoteNetworkModel, CliError> {
    let errors = session.validate(Some(settings));
    if !errors.is_empty() {
        let details = errors
            .iter()
            .map(|e| format!("{}: {}", e.field.label(), e.message))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(CliError::FormInvalid { details });
    }
    Ok(session.submit_model()?)
}

async fn save(
    console: &Console,
    session: &FormSession,
    settings: &ServerSettings,
    mode: SaveMode,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let model = validated_model(session, settings)?;
    let subject = format!("network {}", model.name);
    let mut button = ActionButton::new(SaveNetwork { model, mode });
    util::run_action(console, &mut button, &subject, global).await
}

fn print_section(
    session: &FormSession,
    settings: &ServerSettings,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match session.section() {
        Section::Yaml => {
            output::print_output(session.yaml().unwrap_or_default(), global.quiet);
            return Ok(());
        }
        Section::User => {
            let lines = util::format_user_pairs(&session.values().user);
            output::print_output(&lines.join("\n"), global.quiet);
            return Ok(());
        }
        _ => {}
    }

    let FormRender::Ready { fields, .. } = session.render(Some(settings)) else {
        eprintln!("Waiting for server settings");
        return Ok(());
    };
    let rows: Vec<FieldRow> = fields
        .into_iter()
        .map(|state| FieldRow::new(state, session.values()))
        .collect();
    let out = output::render_list(
        &global.output,
        &rows,
        FieldRow::clone,
        |r| r.field.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
