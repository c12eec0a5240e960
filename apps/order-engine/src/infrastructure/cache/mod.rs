//! Read-through cache with whole-namespace invalidation.
//!
//! One cache per entity type (orders, positions). Keys derive from
//! (operation name, parameters). Every mutation of the entity type clears
//! the entire namespace; per-key invalidation is deliberately not offered,
//! so a stale read after a mutation is impossible by construction. Hit rate
//! is sacrificed for correctness.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

/// Build a cache key from an operation name and its parameters.
#[must_use]
pub fn cache_key(operation: &str, params: &[&str]) -> String {
    if params.is_empty() {
        operation.to_string()
    } else {
        format!("{operation}:{}", params.join(":"))
    }
}

/// Namespace cache for one entity type.
///
/// Holds single-entity and list-valued results separately; both are cleared
/// together on invalidation. Disabled caches are pass-through.
pub struct ReadCache<T: Clone> {
    namespace: &'static str,
    singles: RwLock<HashMap<String, T>>,
    lists: RwLock<HashMap<String, Vec<T>>>,
    enabled: bool,
}

impl<T: Clone> ReadCache<T> {
    /// Create a cache for the given namespace.
    #[must_use]
    pub fn new(namespace: &'static str, enabled: bool) -> Self {
        Self {
            namespace,
            singles: RwLock::new(HashMap::new()),
            lists: RwLock::new(HashMap::new()),
            enabled,
        }
    }

    /// The entity namespace this cache serves.
    #[must_use]
    pub const fn namespace(&self) -> &'static str {
        self.namespace
    }

    /// Look up a single-entity result.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<T> {
        if !self.enabled {
            return None;
        }
        let hit = self.singles.read().get(key).cloned();
        debug!(
            namespace = self.namespace,
            key,
            hit = hit.is_some(),
            "cache lookup"
        );
        hit
    }

    /// Store a single-entity result.
    pub fn put(&self, key: String, value: T) {
        if !self.enabled {
            return;
        }
        self.singles.write().insert(key, value);
    }

    /// Look up a list-valued result.
    #[must_use]
    pub fn get_list(&self, key: &str) -> Option<Vec<T>> {
        if !self.enabled {
            return None;
        }
        let hit = self.lists.read().get(key).cloned();
        debug!(
            namespace = self.namespace,
            key,
            hit = hit.is_some(),
            "cache lookup"
        );
        hit
    }

    /// Store a list-valued result.
    pub fn put_list(&self, key: String, value: Vec<T>) {
        if !self.enabled {
            return;
        }
        self.lists.write().insert(key, value);
    }

    /// Drop every entry in the namespace.
    ///
    /// Called by every mutation of the entity type before it returns, so
    /// readers always observe the write.
    pub fn invalidate_all(&self) {
        let mut singles = self.singles.write();
        let mut lists = self.lists.write();
        let dropped = singles.len() + lists.len();
        singles.clear();
        lists.clear();
        debug!(namespace = self.namespace, dropped, "cache invalidated");
    }

    /// Number of cached entries (singles + lists).
    #[must_use]
    pub fn len(&self) -> usize {
        self.singles.read().len() + self.lists.read().len()
    }

    /// True when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
