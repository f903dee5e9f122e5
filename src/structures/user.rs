//! User profile entity.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Snowflake;
use crate::cache::{decode, Entity};
use crate::error::{CacheError, Result};

/// A user profile as seen by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: Snowflake,
    pub username: Option<String>,
    /// Four-digit suffix that disambiguates equal usernames.
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
    pub bot: bool,
    /// True when only the id is known, e.g. a user seen as a bare mention.
    pub partial: bool,
}

/// User payload as sent by the platform.
#[derive(Deserialize)]
struct RawUser {
    id: Option<Snowflake>,
    username: Option<String>,
    discriminator: Option<String>,
    avatar: Option<String>,
    #[serde(default)]
    bot: bool,
}

impl User {
    /// Composite display name, `username#discriminator`.
    pub fn tag(&self) -> Option<String> {
        match (&self.username, &self.discriminator) {
            (Some(name), Some(disc)) => Some(format!("{name}#{disc}")),
            _ => None,
        }
    }

    /// Whether `tag` is exactly this user's `username#discriminator`.
    pub fn matches_tag(&self, tag: &str) -> bool {
        let (Some(name), Some(disc)) = (&self.username, &self.discriminator) else {
            return false;
        };
        tag.len() == name.len() + 1 + disc.len()
            && tag.starts_with(name.as_str())
            && tag[name.len()..].starts_with('#')
            && tag.ends_with(disc.as_str())
    }
}

impl Entity for User {
    const KIND: &'static str = "user";

    fn id(&self) -> &Snowflake {
        &self.id
    }

    fn from_raw(raw: &Value, key: Option<&Snowflake>) -> Result<Self> {
        let raw: RawUser = decode(Self::KIND, raw)?;
        let id = key
            .cloned()
            .or(raw.id)
            .ok_or_else(|| CacheError::malformed(Self::KIND, "missing field `id`"))?;

        Ok(Self {
            id,
            partial: raw.username.is_none(),
            username: raw.username,
            discriminator: raw.discriminator,
            avatar: raw.avatar,
            bot: raw.bot,
        })
    }
}
