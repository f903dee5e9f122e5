//! User cache with fetch-on-miss.
//!
//! Resolves users from any of:
//! - the user itself
//! - a user id
//! - a `username#discriminator` tag
//! - a guild member (its user)
//! - a message (its author)

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::cache::{AddOptions, Handle, KeyedStore, Resolvable, StoreConfig};
use crate::error::Result;
use crate::structures::{GuildMember, Message, Snowflake, User};
use crate::transport::Transport;

/// A reference that can be resolved to a user.
#[derive(Clone, Copy, Debug)]
pub enum UserRef<'a> {
    User(&'a Handle<User>),
    Id(&'a str),
    /// `username#discriminator`
    Tag(&'a str),
    Member(&'a GuildMember),
    Message(&'a Message),
}

impl<'a> From<&'a str> for UserRef<'a> {
    /// Strings containing `#` are tags, anything else is an id.
    fn from(value: &'a str) -> Self {
        if value.contains('#') {
            Self::Tag(value)
        } else {
            Self::Id(value)
        }
    }
}

impl<'a> From<&'a Snowflake> for UserRef<'a> {
    fn from(id: &'a Snowflake) -> Self {
        Self::Id(id.as_str())
    }
}

impl<'a> From<&'a Handle<User>> for UserRef<'a> {
    fn from(user: &'a Handle<User>) -> Self {
        Self::User(user)
    }
}

impl<'a> From<&'a GuildMember> for UserRef<'a> {
    fn from(member: &'a GuildMember) -> Self {
        Self::Member(member)
    }
}

impl<'a> From<&'a Message> for UserRef<'a> {
    fn from(message: &'a Message) -> Self {
        Self::Message(message)
    }
}

/// Anything that can turn a user reference into a user id.
pub trait UserResolver: Send + Sync {
    fn resolve_user_id(&self, reference: UserRef<'_>) -> Option<Snowflake>;
}

/// Cache of user profiles.
#[derive(Clone)]
pub struct UserCache {
    store: KeyedStore<User>,
    transport: Arc<dyn Transport>,
}

impl UserCache {
    /// Create an empty user cache.
    pub fn new(config: &StoreConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            store: KeyedStore::new("users", config),
            transport,
        }
    }

    /// The underlying keyed store.
    pub fn store(&self) -> &KeyedStore<User> {
        &self.store
    }

    /// Get a cached user by id.
    pub fn get(&self, id: &str) -> Option<Handle<User>> {
        self.store.get(id)
    }

    /// Cache every user record in `records`.
    pub fn hydrate<'a, I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        self.store.hydrate(records)
    }

    /// Build a user from `raw`, replacing any cached user with the same id.
    ///
    /// When `options.link` is set the user is also added to that channel's
    /// recipients.
    pub fn add(&self, raw: &Value, options: AddOptions<'_, User>) -> Result<Handle<User>> {
        let user = self.store.add(raw, options.cache, None)?;

        if let Some(target) = options.link {
            let id = user.read().id.clone();
            target.link(&id, &user);
            debug!("Linked user {} into recipient set", id);
        }

        Ok(user)
    }

    /// Resolve a reference to a user.
    ///
    /// Tags are matched against cached users only; no match is `None`.
    pub fn resolve<'a>(&self, reference: impl Into<UserRef<'a>>) -> Option<Handle<User>> {
        match reference.into() {
            UserRef::Member(member) => Some(Arc::clone(member.user())),
            UserRef::Message(message) => Some(Arc::clone(message.author())),
            UserRef::Tag(tag) => self.store.find(|user| user.matches_tag(tag)),
            UserRef::User(user) => self.store.resolve(Resolvable::Entity(user)),
            UserRef::Id(id) => self.store.resolve(Resolvable::Key(id)),
        }
    }

    /// Resolve a reference to a user id.
    pub fn resolve_id<'a>(&self, reference: impl Into<UserRef<'a>>) -> Option<Snowflake> {
        match reference.into() {
            UserRef::Member(member) => Some(member.user().read().id.clone()),
            UserRef::Message(message) => Some(message.author().read().id.clone()),
            UserRef::Tag(tag) => self
                .store
                .find(|user| user.matches_tag(tag))
                .map(|user| user.read().id.clone()),
            UserRef::User(user) => self.store.resolve_id(Resolvable::Entity(user)),
            UserRef::Id(id) => self.store.resolve_id(Resolvable::Key(id)),
        }
    }

    /// Get a user from the cache, or from the transport if it isn't cached
    /// or only a partial stub is.
    ///
    /// `cache` decides whether a fetched user is stored.
    pub async fn fetch(&self, id: &Snowflake, cache: bool) -> Result<Handle<User>> {
        if let Some(existing) = self.store.get(id.as_str()) {
            let complete = !existing.read().partial;
            if complete {
                debug!("User cache hit for {}", id);
                return Ok(existing);
            }
            debug!("User {} cached as partial, fetching", id);
        } else {
            debug!("User cache miss for {}", id);
        }

        let raw = self.transport.fetch_user(id).await.inspect_err(|e| {
            warn!("Failed to fetch user {}: {}", id, e);
        })?;

        self.add(&raw, AddOptions::new().cache(cache))
    }
}

impl UserResolver for UserCache {
    fn resolve_user_id(&self, reference: UserRef<'_>) -> Option<Snowflake> {
        self.resolve_id(reference)
    }
}

impl std::fmt::Debug for UserCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCache")
            .field("store", &self.store)
            .finish()
    }
}
