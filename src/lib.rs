//! Entity Cache - in-memory entity stores for a chat platform client.
//!
//! Holds remotely-sourced users and presences, resolves loosely-typed
//! references to them, and keeps collections owned by guilds and channels
//! in sync on writes.
//!
//! ## Architecture
//!
//! - `cache` - Generic keyed store, base resolution, entity contracts
//! - `stores` - `UserCache` and `PresenceCache` built on the keyed store
//! - `structures` - Entities and the objects that reference them
//! - `transport` - Remote fetch collaborator
//! - `client` - Wires config, transport and caches together
//! - `config` - Environment configuration
//! - `logging` - Tracing setup

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod stores;
pub mod structures;
pub mod transport;

pub use cache::{AddOptions, CrossLink, Entity, Handle, KeyedStore, Patch, Resolvable, StoreConfig};
pub use client::Client;
pub use config::Config;
pub use error::{CacheError, Result, TransportError};
pub use stores::{PresenceCache, PresenceRef, UserCache, UserRef, UserResolver};
pub use transport::Transport;
