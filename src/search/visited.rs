//! Visited Maps
//!
//! Per-direction parent maps used both for deduplication and for path
//! reconstruction. A key's parent is fixed by whichever expansion task
//! inserts it first; later rediscoveries are no-ops. Roots (the two query
//! endpoints) are stored with no parent. Because insertion happens only
//! when the key is absent, the parent graph cannot contain cycles.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::types::WikiNode;

/// Concurrent map from node key to parent node (`None` = root sentinel).
#[derive(Debug, Default)]
pub struct VisitedMap {
    inner: DashMap<String, Option<WikiNode>>,
}

impl VisitedMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a root entry with no parent.
    pub fn seed_root(&self, key: String) {
        self.inner.insert(key, None);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    /// Atomic insert-if-absent. Returns true when this call inserted, in
    /// which case `parent` is now the key's permanent parent.
    pub fn insert_if_absent(&self, key: String, parent: WikiNode) -> bool {
        match self.inner.entry(key) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Some(parent));
                true
            }
        }
    }

    /// Unconditional write. Reserved for the meeting winner, which must
    /// record the claiming side's parent even when a concurrent insertion
    /// raced it.
    pub fn record(&self, key: String, parent: WikiNode) {
        self.inner.insert(key, Some(parent));
    }

    /// Parent lookup: `None` when the key was never seen, `Some(None)`
    /// for a root, `Some(Some(node))` otherwise.
    pub fn parent(&self, key: &str) -> Option<Option<WikiNode>> {
        self.inner.get(key).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
