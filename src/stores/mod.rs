//! Entity-specific stores built on `KeyedStore`.

mod presences;
mod users;

pub use presences::{PresenceCache, PresenceRef};
pub use users::{UserCache, UserRef, UserResolver};
