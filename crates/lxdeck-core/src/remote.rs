// ── Seams to the outside world ──
//
// Actions talk to the server and the cache only through these traits,
// so the button and gate logic can be driven by recording fakes.

use std::future::Future;

use crate::error::CoreError;
use crate::model::RemoteNetworkModel;
use crate::store::QueryKey;

/// Remote calls issued by actions. Each resolves once the daemon
/// reports the change complete, or rejects with the daemon's error.
pub trait RemoteActions: Send + Sync {
    fn start_instance(&self, name: &str) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn stop_instance(
        &self,
        name: &str,
        force: bool,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn restart_instance(
        &self,
        name: &str,
        force: bool,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn freeze_instance(&self, name: &str) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn unfreeze_instance(&self, name: &str)
    -> impl Future<Output = Result<(), CoreError>> + Send;

    fn create_network(
        &self,
        model: &RemoteNetworkModel,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Replace an existing network's description and config.
    fn update_network(
        &self,
        model: &RemoteNetworkModel,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    fn delete_network(&self, name: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}

/// Fire-and-forget cache invalidation.
pub trait Invalidate: Send + Sync {
    fn invalidate(&self, key: QueryKey);
}
