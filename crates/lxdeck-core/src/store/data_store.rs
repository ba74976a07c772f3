// ── Central data store ──

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use super::QueryKey;
use super::collection::EntityCollection;
use crate::model::{Instance, Network};
use crate::remote::Invalidate;

/// Cached instance and network listings.
///
/// Reads are lock-free; writes use per-shard locks inside `DashMap`.
/// Invalidating a key marks its collection stale so the next read
/// refetches it.
pub struct DataStore {
    pub(crate) instances: EntityCollection<Instance>,
    pub(crate) networks: EntityCollection<Network>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    pub fn new() -> Self {
        Self {
            instances: EntityCollection::new(),
            networks: EntityCollection::new(),
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn instances_snapshot(&self) -> Arc<Vec<Arc<Instance>>> {
        self.instances.snapshot()
    }

    pub fn networks_snapshot(&self) -> Arc<Vec<Arc<Network>>> {
        self.networks.snapshot()
    }

    pub fn instance(&self, name: &str) -> Option<Arc<Instance>> {
        self.instances.get(name)
    }

    pub fn network(&self, name: &str) -> Option<Arc<Network>> {
        self.networks.get(name)
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_instances(&self) -> watch::Receiver<Arc<Vec<Arc<Instance>>>> {
        self.instances.subscribe()
    }

    pub fn subscribe_networks(&self) -> watch::Receiver<Arc<Vec<Arc<Network>>>> {
        self.networks.subscribe()
    }

    /// Flips to `true` whenever `key` is invalidated.
    pub fn subscribe_stale(&self, key: QueryKey) -> watch::Receiver<bool> {
        match key {
            QueryKey::Instances => self.instances.subscribe_stale(),
            QueryKey::Networks => self.networks.subscribe_stale(),
        }
    }

    // ── Freshness ────────────────────────────────────────────────────

    pub fn is_stale(&self, key: QueryKey) -> bool {
        match key {
            QueryKey::Instances => self.instances.is_stale(),
            QueryKey::Networks => self.networks.is_stale(),
        }
    }

    pub fn version(&self, key: QueryKey) -> u64 {
        match key {
            QueryKey::Instances => self.instances.version(),
            QueryKey::Networks => self.networks.version(),
        }
    }

    // ── Mutation ─────────────────────────────────────────────────────

    pub(crate) fn apply_instances(&self, instances: Vec<Instance>) {
        debug!(count = instances.len(), "applying instance listing");
        self.instances
            .replace_all(instances.into_iter().map(|i| (i.name.clone(), i)));
    }

    pub(crate) fn apply_networks(&self, networks: Vec<Network>) {
        debug!(count = networks.len(), "applying network listing");
        self.networks
            .replace_all(networks.into_iter().map(|n| (n.name.clone(), n)));
    }

    pub(crate) fn upsert_instance(&self, instance: Instance) {
        self.instances.upsert(instance.name.clone(), instance);
    }

    pub(crate) fn upsert_network(&self, network: Network) {
        self.networks.upsert(network.name.clone(), network);
    }

    pub(crate) fn forget_instance(&self, name: &str) {
        self.instances.remove(name);
    }

    pub(crate) fn forget_network(&self, name: &str) {
        self.networks.remove(name);
    }
}

impl Invalidate for DataStore {
    fn invalidate(&self, key: QueryKey) {
        debug!(%key, "invalidating cached collection");
        match key {
            QueryKey::Instances => self.instances.mark_stale(),
            QueryKey::Networks => self.networks.mark_stale(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::InstanceStatus;

    #[test]
    fn invalidate_marks_only_its_collection() {
        let store = DataStore::new();
        store.apply_instances(vec![Instance::new("web-1", InstanceStatus::Running)]);
        store.apply_networks(Vec::new());

        store.invalidate(QueryKey::Instances);
        assert!(store.is_stale(QueryKey::Instances));
        assert!(!store.is_stale(QueryKey::Networks));
        // The stale snapshot remains readable until refetched.
        assert_eq!(store.instances_snapshot().len(), 1);
    }

    #[test]
    fn stale_subscribers_are_woken() {
        let store = DataStore::new();
        store.apply_networks(Vec::new());
        let rx = store.subscribe_stale(QueryKey::Networks);
        assert!(!rx.has_changed().unwrap_or(true));

        store.invalidate(QueryKey::Networks);
        assert!(rx.has_changed().unwrap_or(false));
        assert!(*rx.borrow());
    }
}
