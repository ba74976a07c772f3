// lxdeck-api: Async Rust client for the LXD REST API

pub mod auth;
pub mod client;
pub mod error;
pub mod instances;
pub mod models;
pub mod networks;
pub mod operations;
pub mod server;
pub mod transport;

pub use auth::Credentials;
pub use client::LxdClient;
pub use error::Error;
pub use models::{
    InstanceDto, InstanceStatePut, NetworkDto, NetworkPut, NetworksPost, Operation,
    ServerEnvironment, ServerInfo,
};
pub use transport::{TlsMode, TransportConfig};
