//! Cross-link targets and add options.

use super::entity::{Entity, Handle};
use crate::structures::Snowflake;

/// A collection owned by another entity that a store can write into.
///
/// The store never reads from or evicts out of a link target.
pub trait CrossLink<T: Entity>: Send + Sync {
    fn link(&self, key: &Snowflake, entity: &Handle<T>);
}

/// Options for a store `add`.
pub struct AddOptions<'a, T: Entity> {
    /// Collection to also write the result into.
    pub link: Option<&'a dyn CrossLink<T>>,
    /// Whether to keep the entity in the store. Uncached adds return a
    /// transient instance.
    pub cache: bool,
}

impl<'a, T: Entity> AddOptions<'a, T> {
    pub fn new() -> Self {
        Self {
            link: None,
            cache: true,
        }
    }

    /// Also write the result into `target`.
    #[must_use]
    pub fn link(mut self, target: &'a dyn CrossLink<T>) -> Self {
        self.link = Some(target);
        self
    }

    #[must_use]
    pub fn cache(mut self, cache: bool) -> Self {
        self.cache = cache;
        self
    }
}

impl<T: Entity> Default for AddOptions<'_, T> {
    fn default() -> Self {
        Self::new()
    }
}
