// ── Guarded remote actions ──

pub mod button;
pub mod gate;
pub mod kinds;

pub use button::{ActionButton, ActionOutcome, ButtonIcon, SkipReason, Trigger};
pub use gate::{ConfirmGate, Confirmation, GateOutcome, Modifiers};
pub use kinds::{Action, DeleteNetwork, InstanceAction, InstanceLifecycle, SaveMode, SaveNetwork};
