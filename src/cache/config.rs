//! Store configuration.

/// Configuration for a single keyed store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Number of entries to reserve up front.
    pub initial_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 256,
        }
    }
}

impl StoreConfig {
    /// Create a new store config with the given initial capacity.
    pub fn with_capacity(initial_capacity: usize) -> Self {
        Self { initial_capacity }
    }

    /// Set initial capacity (builder pattern).
    #[must_use]
    pub fn initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Config for user profiles.
    /// Users outlive most other entities, so reserve generously.
    pub fn users() -> Self {
        Self::with_capacity(1_024)
    }

    /// Config for presence snapshots.
    /// One per online member across every guild the client sees.
    pub fn presences() -> Self {
        Self::with_capacity(4_096)
    }
}
