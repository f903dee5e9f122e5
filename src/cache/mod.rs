//! Cache module - generic keyed stores and their capabilities.
//!
//! ## Architecture
//!
//! - `KeyedStore` - identity key to shared entity handle, insertion ordered
//! - `Resolvable` - base reference shapes (entity or key) every store resolves
//! - `Entity` / `Patch` - constructor and merge-on-key contracts for entities
//! - `CrossLink` / `AddOptions` - writes into collections a store doesn't own
//!
//! Specialized stores in `stores` embed a `KeyedStore` and add their own
//! reference shapes on top.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let users: KeyedStore<User> = KeyedStore::new("users", &StoreConfig::users());
//!
//! let user = users.add(&raw, true, None)?;
//! let same = users.resolve(Resolvable::Key("42"));
//! ```

mod config;
mod entity;
mod keyed;
mod link;
mod resolve;

pub use config::StoreConfig;
pub(crate) use entity::decode;
pub use entity::{Entity, Handle, Patch};
pub use keyed::KeyedStore;
pub use link::{AddOptions, CrossLink};
pub use resolve::Resolvable;
