//! Presence cache.
//!
//! Presences are keyed by their user's id and merged in place on update.
//! Anything that resolves to a user also resolves to that user's presence.

use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use super::{UserRef, UserResolver};
use crate::cache::{AddOptions, Handle, KeyedStore, Resolvable, StoreConfig};
use crate::error::Result;
use crate::structures::{GuildMember, Message, Presence, Snowflake, User};

/// A reference that can be resolved to a presence.
#[derive(Clone, Copy, Debug)]
pub enum PresenceRef<'a> {
    Presence(&'a Handle<Presence>),
    /// A presence key, which is also a user id.
    Id(&'a str),
    User(UserRef<'a>),
}

impl<'a> From<&'a str> for PresenceRef<'a> {
    fn from(value: &'a str) -> Self {
        match UserRef::from(value) {
            UserRef::Id(id) => Self::Id(id),
            user => Self::User(user),
        }
    }
}

impl<'a> From<&'a Snowflake> for PresenceRef<'a> {
    fn from(id: &'a Snowflake) -> Self {
        Self::Id(id.as_str())
    }
}

impl<'a> From<&'a Handle<Presence>> for PresenceRef<'a> {
    fn from(presence: &'a Handle<Presence>) -> Self {
        Self::Presence(presence)
    }
}

impl<'a> From<UserRef<'a>> for PresenceRef<'a> {
    fn from(user: UserRef<'a>) -> Self {
        Self::User(user)
    }
}

impl<'a> From<&'a Handle<User>> for PresenceRef<'a> {
    fn from(user: &'a Handle<User>) -> Self {
        Self::User(UserRef::User(user))
    }
}

impl<'a> From<&'a GuildMember> for PresenceRef<'a> {
    fn from(member: &'a GuildMember) -> Self {
        Self::User(UserRef::Member(member))
    }
}

impl<'a> From<&'a Message> for PresenceRef<'a> {
    fn from(message: &'a Message) -> Self {
        Self::User(UserRef::Message(message))
    }
}

/// Cache of presence snapshots.
#[derive(Clone)]
pub struct PresenceCache {
    store: KeyedStore<Presence>,
    users: Arc<dyn UserResolver>,
}

impl PresenceCache {
    /// Create an empty presence cache resolving user references through
    /// `users`.
    pub fn new(config: &StoreConfig, users: Arc<dyn UserResolver>) -> Self {
        Self {
            store: KeyedStore::new("presences", config),
            users,
        }
    }

    /// The underlying keyed store.
    pub fn store(&self) -> &KeyedStore<Presence> {
        &self.store
    }

    /// Get a cached presence by user id.
    pub fn get(&self, user_id: &str) -> Option<Handle<Presence>> {
        self.store.get(user_id)
    }

    /// Add every presence record in `records`, merging into existing ones.
    pub fn hydrate<'a, I>(&self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut count = 0;
        for raw in records {
            self.add(raw, AddOptions::new())?;
            count += 1;
        }
        debug!("Hydrated {} presences", count);
        Ok(count)
    }

    /// Add or update the presence in `raw`, keyed by `raw.user.id`.
    ///
    /// An existing presence is patched in place and returned. When
    /// `options.link` is set the result is also written into that guild's
    /// presences.
    pub fn add(&self, raw: &Value, options: AddOptions<'_, Presence>) -> Result<Handle<Presence>> {
        let user_id = Presence::owner_id(raw)?;

        let presence = match self.store.merge(user_id.as_str(), raw)? {
            Some(existing) => existing,
            None => self.store.add(raw, options.cache, Some(&user_id))?,
        };

        if let Some(guild) = options.link {
            guild.link(&user_id, &presence);
            debug!("Linked presence {} into guild", user_id);
        }

        Ok(presence)
    }

    /// Resolve a reference to a presence, falling back to the presence of
    /// whichever user the reference resolves to.
    pub fn resolve<'a>(&self, reference: impl Into<PresenceRef<'a>>) -> Option<Handle<Presence>> {
        match reference.into() {
            PresenceRef::Presence(presence) => self.store.resolve(Resolvable::Entity(presence)),
            PresenceRef::Id(id) => self
                .store
                .resolve(Resolvable::Key(id))
                .or_else(|| self.resolve_through_user(UserRef::Id(id))),
            PresenceRef::User(user) => self.resolve_through_user(user),
        }
    }

    /// Resolve a reference to a presence key.
    ///
    /// A user id is only returned when a presence is stored under it.
    pub fn resolve_id<'a>(&self, reference: impl Into<PresenceRef<'a>>) -> Option<Snowflake> {
        match reference.into() {
            PresenceRef::Presence(presence) => self.store.resolve_id(Resolvable::Entity(presence)),
            PresenceRef::Id(id) => self
                .store
                .resolve_id(Resolvable::Key(id))
                .or_else(|| self.resolve_id_through_user(UserRef::Id(id))),
            PresenceRef::User(user) => self.resolve_id_through_user(user),
        }
    }

    fn resolve_through_user(&self, user: UserRef<'_>) -> Option<Handle<Presence>> {
        let user_id = self.users.resolve_user_id(user)?;
        self.store.resolve(Resolvable::Key(user_id.as_str()))
    }

    fn resolve_id_through_user(&self, user: UserRef<'_>) -> Option<Snowflake> {
        let user_id = self.users.resolve_user_id(user)?;
        self.store.has(user_id.as_str()).then_some(user_id)
    }
}

impl std::fmt::Debug for PresenceCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresenceCache")
            .field("store", &self.store)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use crate::stores::UserCache;
    use crate::structures::{Guild, PresenceStatus};
    use crate::transport::tests::MockTransport;
    use serde_json::json;

    fn caches() -> (Arc<UserCache>, PresenceCache) {
        let users = Arc::new(UserCache::new(
            &StoreConfig::users(),
            Arc::new(MockTransport::new()),
        ));
        let presences = PresenceCache::new(&StoreConfig::presences(), users.clone());
        (users, presences)
    }

    #[test]
    fn test_add_rekeys_by_user_id() {
        let (_, presences) = caches();

        presences
            .add(&json!({"user": {"id": "U1"}, "status": "online"}), AddOptions::new())
            .unwrap();

        let presence = presences.get("U1").unwrap();
        assert_eq!(presence.read().status, PresenceStatus::Online);
    }

    #[test]
    fn test_add_patches_in_place() {
        let (_, presences) = caches();
        let first = presences
            .add(&json!({"user": {"id": "U1"}, "status": "online"}), AddOptions::new())
            .unwrap();

        let second = presences
            .add(&json!({"user": {"id": "U1"}, "activity": "X"}), AddOptions::new())
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(presences.store().len(), 1);
        let presence = second.read();
        assert_eq!(presence.status, PresenceStatus::Online);
        assert_eq!(presence.activity.as_ref().unwrap().name, "X");
    }

    #[test]
    fn test_add_uncached_still_merges_existing() {
        let (_, presences) = caches();
        let cached = presences
            .add(&json!({"user": {"id": "U1"}}), AddOptions::new())
            .unwrap();

        let merged = presences
            .add(&json!({"user": {"id": "U1"}, "status": "idle"}), AddOptions::new().cache(false))
            .unwrap();
        assert!(Arc::ptr_eq(&cached, &merged));

        presences
            .add(&json!({"user": {"id": "U2"}}), AddOptions::new().cache(false))
            .unwrap();
        assert!(presences.get("U2").is_none());
    }

    #[test]
    fn test_add_links_guild() {
        let (_, presences) = caches();
        let guild = Guild::new("G1", "Rustaceans");

        let presence = presences
            .add(&json!({"user": {"id": "U1"}, "status": "dnd"}), AddOptions::new().link(&guild))
            .unwrap();
        presences
            .add(&json!({"user": {"id": "U1"}, "status": "idle"}), AddOptions::new().link(&guild))
            .unwrap();

        assert_eq!(guild.presence_count(), 1);
        let linked = guild.presence("U1").unwrap();
        assert!(Arc::ptr_eq(&linked, &presence));
        assert_eq!(linked.read().status, PresenceStatus::Idle);
    }

    #[test]
    fn test_add_without_owner_fails() {
        let (_, presences) = caches();
        let guild = Guild::new("G1", "Rustaceans");

        let err = presences
            .add(&json!({"status": "online"}), AddOptions::new().link(&guild))
            .unwrap_err();

        assert!(matches!(err, CacheError::MalformedEntityData { kind: "presence", .. }));
        assert_eq!(guild.presence_count(), 0);
    }

    #[test]
    fn test_resolve_through_user() {
        let (users, presences) = caches();
        let ann = users
            .add(&json!({"id": "U1", "username": "Ann", "discriminator": "0001"}), AddOptions::new())
            .unwrap();
        let presence = presences
            .add(&json!({"user": {"id": "U1"}}), AddOptions::new())
            .unwrap();
        let member = GuildMember::new("G1", Arc::clone(&ann));

        assert!(Arc::ptr_eq(&presences.resolve("U1").unwrap(), &presence));
        assert!(Arc::ptr_eq(&presences.resolve("Ann#0001").unwrap(), &presence));
        assert!(Arc::ptr_eq(&presences.resolve(&ann).unwrap(), &presence));
        assert!(Arc::ptr_eq(&presences.resolve(&member).unwrap(), &presence));
        assert!(Arc::ptr_eq(&presences.resolve(&presence).unwrap(), &presence));

        assert_eq!(presences.resolve_id("Ann#0001").unwrap().as_str(), "U1");
        assert_eq!(presences.resolve_id(&member).unwrap().as_str(), "U1");
    }

    #[test]
    fn test_resolve_id_requires_presence() {
        let (users, presences) = caches();
        let bo = users
            .add(&json!({"id": "U2", "username": "Bo", "discriminator": "0002"}), AddOptions::new())
            .unwrap();

        // The user resolves, but has no presence.
        assert!(users.resolve_id(&bo).is_some());
        assert!(presences.resolve_id(&bo).is_none());
        assert!(presences.resolve_id("Bo#0002").is_none());
        assert!(presences.resolve(&bo).is_none());
        assert!(presences.resolve("U2").is_none());
    }

    #[test]
    fn test_resolve_and_resolve_id_agree() {
        let (users, presences) = caches();
        let ann = users
            .add(&json!({"id": "U1", "username": "Ann", "discriminator": "0001"}), AddOptions::new())
            .unwrap();
        let bo = users
            .add(&json!({"id": "U2", "username": "Bo", "discriminator": "0002"}), AddOptions::new())
            .unwrap();
        let presence = presences
            .add(&json!({"user": {"id": "U1"}, "status": "online"}), AddOptions::new())
            .unwrap();
        let transient = presences
            .add(&json!({"user": {"id": "U3"}}), AddOptions::new().cache(false))
            .unwrap();
        let member = GuildMember::new("G1", Arc::clone(&ann));
        let message = Message::new("M1", "C1", Arc::clone(&ann), "hi");
        let bo_message = Message::new("M2", "C1", Arc::clone(&bo), "hey");

        let refs = [
            PresenceRef::Presence(&presence),
            PresenceRef::Presence(&transient),
            PresenceRef::Id("U1"),
            PresenceRef::Id("U2"),
            PresenceRef::Id("missing"),
            PresenceRef::User(UserRef::Tag("Ann#0001")),
            PresenceRef::User(UserRef::Tag("Bo#0002")),
            PresenceRef::User(UserRef::Tag("Ann#9999")),
            PresenceRef::User(UserRef::Member(&member)),
            PresenceRef::User(UserRef::Message(&message)),
            PresenceRef::User(UserRef::Message(&bo_message)),
            PresenceRef::User(UserRef::User(&ann)),
            PresenceRef::User(UserRef::User(&bo)),
        ];

        for reference in refs {
            let found = presences.resolve(reference);
            let id = presences.resolve_id(reference);
            assert_eq!(found.is_some(), id.is_some(), "{reference:?}");
            if let (Some(found), Some(id)) = (found, id) {
                assert_eq!(found.read().user_id, id);
            }
        }
    }

    #[test]
    fn test_hydrate_merges_duplicates() {
        let (_, presences) = caches();
        let records = [
            json!({"user": {"id": "U1"}, "status": "online"}),
            json!({"user": {"id": "U2"}}),
            json!({"user": {"id": "U1"}, "activity": {"name": "X"}}),
        ];

        assert_eq!(presences.hydrate(&records).unwrap(), 3);
        assert_eq!(presences.store().len(), 2);
        let presence = presences.get("U1").unwrap();
        assert_eq!(presence.read().status, PresenceStatus::Online);
        assert!(presence.read().activity.is_some());
    }
}
