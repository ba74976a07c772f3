// ── Reactive data store ──
//
// Last fetched snapshots of the instance and network collections, plus
// the cache invalidation signal actions fire after a successful change.

mod collection;
mod data_store;

pub use data_store::DataStore;

use serde::Serialize;
use strum::{Display, EnumIter};

/// Identifies a cached collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum QueryKey {
    Instances,
    Networks,
}
