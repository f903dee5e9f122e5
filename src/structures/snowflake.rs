//! Snowflake identity keys.

use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds between the Unix epoch and the first second of 2015.
const DISCORD_EPOCH_MS: i64 = 1_420_070_400_000;

/// A platform-assigned identifier, kept as the string the wire carries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snowflake(String);

impl Snowflake {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Creation time encoded in the upper bits of the id.
    ///
    /// Returns `None` for ids that are not numeric snowflakes.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.0.parse::<u64>().ok()?;
        let ms = (raw >> 22) as i64 + DISCORD_EPOCH_MS;
        DateTime::from_timestamp_millis(ms)
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for Snowflake {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Snowflake {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for Snowflake {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for Snowflake {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}
