//! Entities held by the caches, and the objects that reference them.

mod channel;
mod guild;
mod message;
mod presence;
mod snowflake;
mod user;

pub use channel::Channel;
pub use guild::{Guild, GuildMember};
pub use message::Message;
pub use presence::{Activity, ActivityType, ClientStatus, Presence, PresenceStatus};
pub use snowflake::Snowflake;
pub use user::User;
