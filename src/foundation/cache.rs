use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use crate::foundation::error::{SpriteGridError, SpriteGridResult};

/// Bounded key/value cache with insertion-order eviction.
///
/// Caches in the engine (parsed descriptors, encoded animations) are explicit
/// injected services rather than ambient singletons so the core stays testable
/// in isolation. Eviction is oldest-insertion-first; re-inserting an existing
/// key refreshes its value but not its eviction position.
#[derive(Clone, Debug)]
pub struct BoundedCache<K, V> {
    capacity: usize,
    map: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K: Eq + Hash + Clone, V> BoundedCache<K, V> {
    /// Construct a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> SpriteGridResult<Self> {
        if capacity == 0 {
            return Err(SpriteGridError::validation(
                "BoundedCache capacity must be > 0",
            ));
        }
        Ok(Self {
            capacity,
            map: HashMap::new(),
            order: VecDeque::new(),
        })
    }

    /// Lookup a cached value.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.map.get(key)
    }

    /// Insert a value, evicting the oldest entry once over capacity.
    pub fn insert(&mut self, key: K, value: V) {
        if self.map.insert(key.clone(), value).is_none() {
            self.order.push_back(key);
            while self.map.len() > self.capacity {
                let Some(oldest) = self.order.pop_front() else {
                    break;
                };
                self.map.remove(&oldest);
            }
        }
    }

    /// Remove one entry, returning its value if present.
    pub fn evict(&mut self, key: &K) -> Option<V> {
        let value = self.map.remove(key)?;
        self.order.retain(|k| k != key);
        Some(value)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Configured maximum entry count.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/cache.rs"]
mod tests;
