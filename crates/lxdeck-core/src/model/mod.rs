// ── Domain model ──
//
// Canonical representations of the server-owned entities the console
// reads. Instances and networks are identified by name; nothing here is
// persisted locally.

pub mod instance;
pub mod network;
pub mod settings;

pub use instance::{Instance, InstanceKind, InstanceStatus};
pub use network::{Network, NetworkType, RemoteNetworkModel};
pub use settings::ServerSettings;
