//! Base reference resolution.

use std::sync::Arc;

use super::entity::{Entity, Handle};
use super::KeyedStore;
use crate::structures::Snowflake;

/// The reference shapes every store understands.
pub enum Resolvable<'a, T: Entity> {
    /// Already the entity.
    Entity(&'a Handle<T>),
    /// Its identity key.
    Key(&'a str),
}

// Manual Clone/Copy implementations that don't require T: Clone
impl<T: Entity> Clone for Resolvable<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Entity> Copy for Resolvable<'_, T> {}

impl<T: Entity> KeyedStore<T> {
    /// Resolve a reference to an entity.
    ///
    /// Keys resolve only when they have a live entry.
    pub fn resolve(&self, reference: Resolvable<'_, T>) -> Option<Handle<T>> {
        match reference {
            Resolvable::Entity(handle) => Some(Arc::clone(handle)),
            Resolvable::Key(key) => self.get(key),
        }
    }

    /// Resolve a reference to an identity key.
    ///
    /// Returns `Some` exactly when [`resolve`](Self::resolve) does, with the
    /// key of the same entity.
    pub fn resolve_id(&self, reference: Resolvable<'_, T>) -> Option<Snowflake> {
        match reference {
            Resolvable::Entity(handle) => Some(handle.read().id().clone()),
            Resolvable::Key(key) => self.has(key).then(|| Snowflake::from(key)),
        }
    }
}
