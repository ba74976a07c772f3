//! Instance command handlers.

use std::sync::Arc;

use tabled::Tabled;

use lxdeck_core::{Action, ActionButton, Console, Instance, InstanceAction, InstanceLifecycle};

use crate::cli::{GlobalOpts, InstancesArgs, InstancesCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct InstanceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Location")]
    location: String,
    #[tabled(rename = "Created")]
    created: String,
}

impl From<&Arc<Instance>> for InstanceRow {
    fn from(i: &Arc<Instance>) -> Self {
        Self {
            name: i.name.clone(),
            status: i.status.to_string(),
            kind: i.kind.to_string(),
            location: i.location.clone().unwrap_or_default(),
            created: i
                .created_at
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
        }
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    console: &Console,
    args: InstancesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let (name, action, force) = match args.command {
        InstancesCommand::List => {
            let snap = console.instances().await?;
            let out = output::render_list(
                &global.output,
                &snap,
                |i| InstanceRow::from(i),
                |i| i.name.clone(),
            )?;
            output::print_output(&out, global.quiet);
            return Ok(());
        }
        InstancesCommand::Start { name } => (name, InstanceAction::Start, false),
        InstancesCommand::Stop { name, force } => (name, InstanceAction::Stop, force),
        InstancesCommand::Restart { name, force } => (name, InstanceAction::Restart, force),
        InstancesCommand::Freeze { name } => (name, InstanceAction::Freeze, false),
        InstancesCommand::Unfreeze { name } => (name, InstanceAction::Unfreeze, false),
    };

    let instance = console.instance(&name).await?;
    let lifecycle = InstanceLifecycle::new(&instance, action).with_force(force);
    if !lifecycle.is_allowed() {
        return Err(CliError::Precondition {
            action: action.to_string(),
            subject: format!("instance {name}"),
            reason: format!(
                "it is {}, must be {}",
                instance.status,
                action.required_status()
            ),
        });
    }
    let mut button = ActionButton::new(lifecycle);
    util::run_action(console, &mut button, &format!("instance {name}"), global).await
}
