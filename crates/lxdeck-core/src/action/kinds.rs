// ── Action kinds ──
//
// What each button does: its precondition, whether it is gated, which
// remote call it issues, which cache it invalidates and what the user is
// told afterwards.

use std::future::Future;

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

use super::gate::Confirmation;
use crate::error::CoreError;
use crate::model::{Instance, InstanceStatus, Network, RemoteNetworkModel};
use crate::remote::RemoteActions;
use crate::store::QueryKey;

/// Everything an `ActionButton` needs to know about its action.
pub trait Action: Send + Sync {
    /// Button caption.
    fn label(&self) -> &'static str;

    /// Icon name shown while idle.
    fn icon(&self) -> &'static str;

    /// Precondition on the subject's current state.
    fn is_allowed(&self) -> bool;

    /// Prompt for gated actions, `None` for actions that fire directly.
    fn confirmation(&self) -> Option<Confirmation>;

    /// Collection to invalidate after success.
    fn query_key(&self) -> QueryKey;

    fn success_message(&self) -> String;

    fn failure_title(&self) -> String;

    fn execute<R: RemoteActions>(
        &self,
        remote: &R,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;
}

// ── Instance lifecycle ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum InstanceAction {
    Start,
    Stop,
    Restart,
    Freeze,
    Unfreeze,
}

impl InstanceAction {
    /// The status an instance must be in for this action.
    pub fn required_status(self) -> InstanceStatus {
        match self {
            Self::Start => InstanceStatus::Stopped,
            Self::Stop | Self::Restart | Self::Freeze => InstanceStatus::Running,
            Self::Unfreeze => InstanceStatus::Frozen,
        }
    }

    pub fn is_gated(self) -> bool {
        matches!(self, Self::Stop | Self::Restart | Self::Freeze)
    }

    fn past_tense(self) -> &'static str {
        match self {
            Self::Start => "started",
            Self::Stop => "stopped",
            Self::Restart => "restarted",
            Self::Freeze => "frozen",
            Self::Unfreeze => "unfrozen",
        }
    }
}

/// Start, stop, restart, freeze or unfreeze one instance.
#[derive(Debug, Clone)]
pub struct InstanceLifecycle {
    pub name: String,
    pub status: InstanceStatus,
    pub action: InstanceAction,
    /// Skip the clean shutdown (stop and restart only).
    pub force: bool,
}

impl InstanceLifecycle {
    pub fn new(instance: &Instance, action: InstanceAction) -> Self {
        Self {
            name: instance.name.clone(),
            status: instance.status,
            action,
            force: false,
        }
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

impl Action for InstanceLifecycle {
    fn label(&self) -> &'static str {
        match self.action {
            InstanceAction::Start => "Start",
            InstanceAction::Stop => "Stop",
            InstanceAction::Restart => "Restart",
            InstanceAction::Freeze => "Freeze",
            InstanceAction::Unfreeze => "Unfreeze",
        }
    }

    fn icon(&self) -> &'static str {
        match self.action {
            InstanceAction::Start | InstanceAction::Unfreeze => "play",
            InstanceAction::Stop => "power-off",
            InstanceAction::Restart => "restart",
            InstanceAction::Freeze => "pause",
        }
    }

    fn is_allowed(&self) -> bool {
        self.status == self.action.required_status()
    }

    fn confirmation(&self) -> Option<Confirmation> {
        if !self.action.is_gated() {
            return None;
        }
        let force = if self.force { " forcefully" } else { "" };
        Some(Confirmation {
            title: format!("Confirm {}", self.action),
            message: format!("This will{force} {} instance {}.", self.action, self.name),
            confirm_label: self.label().to_owned(),
        })
    }

    fn query_key(&self) -> QueryKey {
        QueryKey::Instances
    }

    fn success_message(&self) -> String {
        format!("Instance {} {}.", self.name, self.action.past_tense())
    }

    fn failure_title(&self) -> String {
        format!("Error on instance {}.", self.action)
    }

    async fn execute<R: RemoteActions>(&self, remote: &R) -> Result<(), CoreError> {
        match self.action {
            InstanceAction::Start => remote.start_instance(&self.name).await,
            InstanceAction::Stop => remote.stop_instance(&self.name, self.force).await,
            InstanceAction::Restart => remote.restart_instance(&self.name, self.force).await,
            InstanceAction::Freeze => remote.freeze_instance(&self.name).await,
            InstanceAction::Unfreeze => remote.unfreeze_instance(&self.name).await,
        }
    }
}

// ── Networks ─────────────────────────────────────────────────────────

/// Delete a managed network that nothing uses.
#[derive(Debug, Clone)]
pub struct DeleteNetwork {
    pub name: String,
    pub deletable: bool,
}

impl DeleteNetwork {
    pub fn new(network: &Network) -> Self {
        Self {
            name: network.name.clone(),
            deletable: network.is_deletable(),
        }
    }
}

impl Action for DeleteNetwork {
    fn label(&self) -> &'static str {
        "Delete"
    }

    fn icon(&self) -> &'static str {
        "delete"
    }

    fn is_allowed(&self) -> bool {
        self.deletable
    }

    fn confirmation(&self) -> Option<Confirmation> {
        Some(Confirmation {
            title: "Confirm delete".into(),
            message: format!(
                "This will permanently delete network {}. This action cannot be undone.",
                self.name
            ),
            confirm_label: "Delete".into(),
        })
    }

    fn query_key(&self) -> QueryKey {
        QueryKey::Networks
    }

    fn success_message(&self) -> String {
        format!("Network {} deleted.", self.name)
    }

    fn failure_title(&self) -> String {
        "Network deletion failed".into()
    }

    async fn execute<R: RemoteActions>(&self, remote: &R) -> Result<(), CoreError> {
        remote.delete_network(&self.name).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Create,
    Update,
}

/// Submit a network form. Never gated.
#[derive(Debug, Clone)]
pub struct SaveNetwork {
    pub model: RemoteNetworkModel,
    pub mode: SaveMode,
}

impl Action for SaveNetwork {
    fn label(&self) -> &'static str {
        match self.mode {
            SaveMode::Create => "Create",
            SaveMode::Update => "Save changes",
        }
    }

    fn icon(&self) -> &'static str {
        "save"
    }

    fn is_allowed(&self) -> bool {
        true
    }

    fn confirmation(&self) -> Option<Confirmation> {
        None
    }

    fn query_key(&self) -> QueryKey {
        QueryKey::Networks
    }

    fn success_message(&self) -> String {
        match self.mode {
            SaveMode::Create => format!("Network {} created.", self.model.name),
            SaveMode::Update => format!("Network {} updated.", self.model.name),
        }
    }

    fn failure_title(&self) -> String {
        match self.mode {
            SaveMode::Create => "Network creation failed".into(),
            SaveMode::Update => "Network update failed".into(),
        }
    }

    async fn execute<R: RemoteActions>(&self, remote: &R) -> Result<(), CoreError> {
        match self.mode {
            SaveMode::Create => remote.create_network(&self.model).await,
            SaveMode::Update => remote.update_network(&self.model).await,
        }
    }
}
