// ── Generic reactive entity collection ──
//
// Concurrent storage keyed by entity name with push-based change
// notification via `watch` channels. A collection starts stale and
// becomes fresh when a full listing is applied.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

pub(crate) struct EntityCollection<T: Clone + Send + Sync + 'static> {
    /// Primary storage: entity name -> entity.
    by_name: DashMap<String, Arc<T>>,

    /// Version counter, bumped on every mutation.
    version: watch::Sender<u64>,

    /// Full snapshot sorted by name, rebuilt on mutation.
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,

    /// `true` until loaded and again after each invalidation.
    stale: watch::Sender<bool>,
}

impl<T: Clone + Send + Sync + 'static> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (stale, _) = watch::channel(true);

        Self {
            by_name: DashMap::new(),
            version,
            snapshot,
            stale,
        }
    }

    /// Replace the whole collection with a fresh listing.
    pub(crate) fn replace_all(&self, entities: impl IntoIterator<Item = (String, T)>) {
        self.by_name.clear();
        for (name, entity) in entities {
            self.by_name.insert(name, Arc::new(entity));
        }
        self.rebuild_snapshot();
        self.bump_version();
        self.stale.send_replace(false);
    }

    /// Insert or update an entity. Returns `true` if the name was new.
    pub(crate) fn upsert(&self, name: String, entity: T) -> bool {
        let is_new = self.by_name.insert(name, Arc::new(entity)).is_none();
        self.rebuild_snapshot();
        self.bump_version();
        is_new
    }

    /// Remove an entity by name. Returns the removed entity if it existed.
    pub(crate) fn remove(&self, name: &str) -> Option<Arc<T>> {
        let removed = self.by_name.remove(name).map(|(_, v)| v);
        if removed.is_some() {
            self.rebuild_snapshot();
            self.bump_version();
        }
        removed
    }

    pub(crate) fn get(&self, name: &str) -> Option<Arc<T>> {
        self.by_name.get(name).map(|r| Arc::clone(r.value()))
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub(crate) fn mark_stale(&self) {
        self.stale.send_replace(true);
    }

    pub(crate) fn is_stale(&self) -> bool {
        *self.stale.borrow()
    }

    pub(crate) fn subscribe_stale(&self) -> watch::Receiver<bool> {
        self.stale.subscribe()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.by_name.len()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn rebuild_snapshot(&self) {
        let mut values: Vec<(String, Arc<T>)> = self
            .by_name
            .iter()
            .map(|r| (r.key().clone(), Arc::clone(r.value())))
            .collect();
        values.sort_by(|a, b| a.0.cmp(&b.0));
        let values: Vec<Arc<T>> = values.into_iter().map(|(_, v)| v).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    fn bump_version(&self) {
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn starts_stale_until_loaded() {
        let col: EntityCollection<String> = EntityCollection::new();
        assert!(col.is_stale());
        col.replace_all([("a".to_string(), "x".to_string())]);
        assert!(!col.is_stale());
        col.mark_stale();
        assert!(col.is_stale());
    }

    #[test]
    fn upsert_reports_new_names() {
        let col: EntityCollection<String> = EntityCollection::new();
        assert!(col.upsert("web-1".into(), "Running".into()));
        assert!(!col.upsert("web-1".into(), "Stopped".into()));
        assert_eq!(*col.get("web-1").unwrap(), "Stopped");
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn replace_all_drops_missing_entities() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.upsert("old".into(), "x".into());
        col.replace_all([("new".to_string(), "y".to_string())]);
        assert!(col.get("old").is_none());
        assert_eq!(col.len(), 1);
    }

    #[test]
    fn snapshot_is_sorted_by_name() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.replace_all([
            ("web-2".to_string(), "b".to_string()),
            ("db-1".to_string(), "c".to_string()),
            ("web-1".to_string(), "a".to_string()),
        ]);
        let snap: Vec<String> = col.snapshot().iter().map(|s| (**s).clone()).collect();
        assert_eq!(snap, vec!["c", "a", "b"]);
    }

    #[test]
    fn remove_bumps_version_only_when_present() {
        let col: EntityCollection<String> = EntityCollection::new();
        col.upsert("a".into(), "x".into());
        let before = col.version();
        assert!(col.remove("missing").is_none());
        assert_eq!(col.version(), before);
        assert!(col.remove("a").is_some());
        assert_eq!(col.version(), before + 1);
        assert!(col.snapshot().is_empty());
    }
}
