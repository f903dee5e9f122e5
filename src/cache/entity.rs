//! Entity contracts shared by every store.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{CacheError, Result};
use crate::structures::Snowflake;

/// Shared handle to a cached entity.
///
/// Two handles refer to the same instance iff `Arc::ptr_eq` holds.
pub type Handle<T> = Arc<RwLock<T>>;

/// An entity that can be built from a raw record and stored by key.
pub trait Entity: Sized + Send + Sync + 'static {
    /// Short name used in logs and error messages.
    const KIND: &'static str;

    /// Stable identity key.
    fn id(&self) -> &Snowflake;

    /// Build an entity from a raw record.
    ///
    /// `key` overrides the id embedded in `raw`, for payloads whose own id
    /// field belongs to a nested object.
    fn from_raw(raw: &Value, key: Option<&Snowflake>) -> Result<Self>;
}

/// Entities that merge newer partial records into an existing instance.
///
/// Fields present in `raw` overwrite, absent fields are kept. A record that
/// fails to decode leaves the instance untouched.
pub trait Patch: Entity {
    fn patch(&mut self, raw: &Value) -> Result<()>;
}

/// Decode a raw record into a wire struct, mapping failures to
/// `MalformedEntityData`.
pub(crate) fn decode<R: DeserializeOwned>(kind: &'static str, raw: &Value) -> Result<R> {
    R::deserialize(raw).map_err(|e| CacheError::malformed(kind, e))
}
