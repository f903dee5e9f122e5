//! Error types for the entity cache.

use std::time::Duration;

use crate::structures::Snowflake;

/// Errors raised by the transport collaborator when fetching raw records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("remote entity not found: {0}")]
    NotFound(Snowflake),

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Duration },

    #[error("network error: {0}")]
    Network(String),
}

/// Errors raised by cache operations.
///
/// Resolution misses are not errors; `resolve`/`resolve_id` return `None`.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// A raw record could not be turned into an entity.
    #[error("malformed {kind} data: {reason}")]
    MalformedEntityData { kind: &'static str, reason: String },

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl CacheError {
    pub(crate) fn malformed(kind: &'static str, reason: impl ToString) -> Self {
        Self::MalformedEntityData {
            kind,
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_is_transparent() {
        let err = CacheError::from(TransportError::NotFound(Snowflake::from("42")));
        assert_eq!(err.to_string(), "remote entity not found: 42");
    }

    #[test]
    fn test_malformed_message() {
        let err = CacheError::malformed("user", "missing field `id`");
        assert_eq!(err.to_string(), "malformed user data: missing field `id`");
    }
}
