//! Configuration for the entity caches.
//!
//! Loads configuration from environment variables, with defaults for
//! everything.

use std::env;
use std::str::FromStr;

use tracing::warn;

use crate::cache::StoreConfig;

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub users: StoreConfig,
    pub presences: StoreConfig,

    /// Whether users fetched from the transport are kept in the cache.
    pub cache_fetched_users: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            users: StoreConfig::users(),
            presences: StoreConfig::presences(),
            cache_fetched_users: true,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// - `ENTITY_CACHE_USER_CAPACITY`
    /// - `ENTITY_CACHE_PRESENCE_CAPACITY`
    /// - `ENTITY_CACHE_FETCHED_USERS` (`true`/`false`)
    ///
    /// Unset or unparseable values keep their defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            users: StoreConfig::with_capacity(parse_or(
                &lookup,
                "ENTITY_CACHE_USER_CAPACITY",
                defaults.users.initial_capacity,
            )),
            presences: StoreConfig::with_capacity(parse_or(
                &lookup,
                "ENTITY_CACHE_PRESENCE_CAPACITY",
                defaults.presences.initial_capacity,
            )),
            cache_fetched_users: parse_or(
                &lookup,
                "ENTITY_CACHE_FETCHED_USERS",
                defaults.cache_fetched_users,
            ),
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(value) = lookup(key) else {
        return default;
    };
    match value.trim().to_lowercase().parse() {
        Ok(parsed) => parsed,
        Err(_) => {
            warn!("Ignoring invalid {}={:?}, using default", key, value);
            default
        }
    }
}
