//! Transport collaborator used for fetch-on-miss.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::TransportError;
use crate::structures::Snowflake;

/// Source of raw entity records from the platform API.
///
/// Implementations own retries and rate limiting; the caches call each
/// method at most once per fetch and propagate failures unchanged.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch a single user's raw record by id.
    async fn fetch_user(&self, id: &Snowflake) -> Result<Value, TransportError>;
}
