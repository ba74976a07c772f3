// lxdeck-core: Domain layer between lxdeck-api and the front end.

pub mod action;
pub mod config;
pub mod console;
pub mod convert;
pub mod error;
pub mod form;
pub mod model;
pub mod notify;
pub mod remote;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use action::{
    Action, ActionButton, ActionOutcome, ButtonIcon, Confirmation, DeleteNetwork,
    InstanceAction, InstanceLifecycle, Modifiers, SaveMode, SaveNetwork, Trigger,
};
pub use config::{AuthCredentials, ConsoleConfig, TlsVerification};
pub use console::Console;
pub use error::CoreError;
pub use form::{
    FieldError, FieldId, FieldKind, FieldState, FormEdit, FormRender, FormSession,
    NetworkFormValues, Section, TypeOption, UserPair,
};
pub use notify::{Notification, Notifications, Severity};
pub use remote::{Invalidate, RemoteActions};
pub use store::{DataStore, QueryKey};

pub use model::{
    Instance, InstanceKind, InstanceStatus, Network, NetworkType, RemoteNetworkModel,
    ServerSettings,
};
