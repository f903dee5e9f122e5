//! Guilds and their members.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::{Presence, Snowflake, User};
use crate::cache::{CrossLink, Handle};

/// A guild as far as the caches need it: an id and the presences of its
/// members.
#[derive(Debug)]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    presences: DashMap<Snowflake, Handle<Presence>>,
}

impl Guild {
    pub fn new(id: impl Into<Snowflake>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            presences: DashMap::new(),
        }
    }

    /// Presence of a member, if one has been linked.
    pub fn presence(&self, user_id: &str) -> Option<Handle<Presence>> {
        self.presences
            .get(user_id)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Every member presence linked into this guild.
    pub fn presences(&self) -> Vec<Handle<Presence>> {
        self.presences
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }

    /// Number of member presences this guild holds.
    pub fn presence_count(&self) -> usize {
        self.presences.len()
    }
}

impl CrossLink<Presence> for Guild {
    fn link(&self, key: &Snowflake, entity: &Handle<Presence>) {
        self.presences.insert(key.clone(), Arc::clone(entity));
    }
}

/// A user's membership in a guild. Owns its user one hop away.
#[derive(Debug, Clone)]
pub struct GuildMember {
    pub guild_id: Snowflake,
    pub nickname: Option<String>,
    pub joined_at: Option<DateTime<Utc>>,
    user: Handle<User>,
}

impl GuildMember {
    pub fn new(guild_id: impl Into<Snowflake>, user: Handle<User>) -> Self {
        Self {
            guild_id: guild_id.into(),
            nickname: None,
            joined_at: None,
            user,
        }
    }

    #[must_use]
    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn user(&self) -> &Handle<User> {
        &self.user
    }

    /// Nickname if set, otherwise the username.
    pub fn display_name(&self) -> Option<String> {
        self.nickname
            .clone()
            .or_else(|| self.user.read().username.clone())
    }
}
