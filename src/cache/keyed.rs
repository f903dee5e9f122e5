//! Keyed entity store.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use super::entity::{Entity, Handle, Patch};
use super::StoreConfig;
use crate::error::Result;
use crate::structures::Snowflake;

/// Mapping from identity key to a shared entity handle.
///
/// - At most one live entity per key
/// - Iteration follows insertion order
/// - Clone-friendly (cloning is cheap, shares the same entries)
///
/// Entries live until removed; there is no time- or size-based eviction.
pub struct KeyedStore<T: Entity> {
    entries: Arc<RwLock<IndexMap<Snowflake, Handle<T>>>>,
    name: Arc<str>,
}

// Manual Clone implementation that doesn't require T: Clone
impl<T: Entity> Clone for KeyedStore<T> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
            name: Arc::clone(&self.name),
        }
    }
}

impl<T: Entity> KeyedStore<T> {
    /// Create a new empty store with the given name and config.
    pub fn new(name: impl Into<Arc<str>>, config: &StoreConfig) -> Self {
        Self {
            entries: Arc::new(RwLock::new(IndexMap::with_capacity(
                config.initial_capacity,
            ))),
            name: name.into(),
        }
    }

    /// Get the name of this store.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get an entity by key.
    pub fn get(&self, key: &str) -> Option<Handle<T>> {
        self.entries.read().get(key).cloned()
    }

    /// Check if a key has a live entry.
    pub fn has(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Build an entity from `raw` and, if `cache` is set, store it.
    ///
    /// `key` overrides the id embedded in `raw`. An existing entry under the
    /// same key is replaced. A malformed record fails before anything is
    /// stored.
    pub fn add(&self, raw: &Value, cache: bool, key: Option<&Snowflake>) -> Result<Handle<T>> {
        let entity = T::from_raw(raw, key)?;
        let id = entity.id().clone();
        let handle = Arc::new(RwLock::new(entity));

        if cache {
            let replaced = self
                .entries
                .write()
                .insert(id.clone(), Arc::clone(&handle))
                .is_some();
            debug!(
                "{} store '{}': {} {}",
                T::KIND,
                self.name,
                if replaced { "replaced" } else { "inserted" },
                id
            );
        } else {
            debug!("{} store '{}': built uncached {}", T::KIND, self.name, id);
        }

        Ok(handle)
    }

    /// Add every record in `records`, caching each one.
    ///
    /// Stops at the first malformed record; records before it stay stored.
    pub fn hydrate<'a, I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut count = 0;
        for raw in records {
            self.add(raw, true, None)?;
            count += 1;
        }
        debug!("{} store '{}': hydrated {} entries", T::KIND, self.name, count);
        Ok(count)
    }

    /// Remove an entity by key, keeping the order of the rest.
    pub fn remove(&self, key: &str) -> Option<Handle<T>> {
        let removed = self.entries.write().shift_remove(key);
        if removed.is_some() {
            debug!("{} store '{}': evicted {}", T::KIND, self.name, key);
        }
        removed
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> Vec<Snowflake> {
        self.entries.read().keys().cloned().collect()
    }

    /// Handles in insertion order.
    pub fn values(&self) -> Vec<Handle<T>> {
        self.entries.read().values().cloned().collect()
    }

    /// First entity, in insertion order, matching `predicate`.
    pub fn find<F>(&self, predicate: F) -> Option<Handle<T>>
    where
        F: Fn(&T) -> bool,
    {
        self.entries
            .read()
            .values()
            .find(|handle| predicate(&*handle.read()))
            .cloned()
    }
}

impl<T: Patch> KeyedStore<T> {
    /// Patch the entity stored under `key` in place.
    ///
    /// Returns the same handle that was stored, or `None` if nothing lives
    /// under `key`.
    pub fn merge(&self, key: &str, raw: &Value) -> Result<Option<Handle<T>>> {
        let Some(existing) = self.get(key) else {
            return Ok(None);
        };
        existing.write().patch(raw)?;
        debug!("{} store '{}': merged {}", T::KIND, self.name, key);
        Ok(Some(existing))
    }
}

impl<T: Entity> std::fmt::Debug for KeyedStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyedStore")
            .field("name", &self.name)
            .field("kind", &T::KIND)
            .field("len", &self.len())
            .finish()
    }
}
