//! Presence snapshot entity.
//!
//! Presences are keyed by the id of the user they belong to. The payload
//! carries that id under `user.id`; there is no top-level `id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Snowflake;
use crate::cache::{decode, Entity, Patch};
use crate::error::{CacheError, Result};

/// Online status of a user.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Idle,
    Dnd,
    Invisible,
    #[default]
    Offline,
}

/// Activity kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[default]
    Playing,
    Streaming,
    Listening,
    Watching,
}

/// What a user is currently doing.
///
/// Deserializes from either a full object or a bare name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawActivity")]
pub struct Activity {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub url: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawActivity {
    Name(String),
    Full {
        name: String,
        #[serde(default, rename = "type")]
        kind: ActivityType,
        #[serde(default)]
        url: Option<String>,
    },
}

impl From<RawActivity> for Activity {
    fn from(raw: RawActivity) -> Self {
        match raw {
            RawActivity::Name(name) => Self {
                name,
                kind: ActivityType::default(),
                url: None,
            },
            RawActivity::Full { name, kind, url } => Self { name, kind, url },
        }
    }
}

/// Per-platform status.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientStatus {
    #[serde(default)]
    pub desktop: Option<PresenceStatus>,
    #[serde(default)]
    pub mobile: Option<PresenceStatus>,
    #[serde(default)]
    pub web: Option<PresenceStatus>,
}

/// A user's presence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Presence {
    pub user_id: Snowflake,
    pub guild_id: Option<Snowflake>,
    pub status: PresenceStatus,
    pub activity: Option<Activity>,
    pub client_status: ClientStatus,
    /// When this snapshot was last built or patched.
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct RawOwner {
    id: Snowflake,
}

/// Presence payload. Every field is optional so the same shape serves both
/// full records and patches.
#[derive(Deserialize)]
struct RawPresence {
    #[serde(default)]
    user: Option<RawOwner>,
    #[serde(default)]
    guild_id: Option<Snowflake>,
    #[serde(default)]
    status: Option<PresenceStatus>,
    // Some(None) clears the activity; a missing field keeps it.
    #[serde(default, deserialize_with = "explicit")]
    activity: Option<Option<Activity>>,
    #[serde(default)]
    client_status: Option<ClientStatus>,
}

fn explicit<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl Presence {
    /// Id of the user owning the presence in `raw`.
    pub fn owner_id(raw: &Value) -> Result<Snowflake> {
        raw.get("user")
            .and_then(|user| user.get("id"))
            .ok_or_else(|| CacheError::malformed(Self::KIND, "missing field `user.id`"))
            .and_then(|id| {
                Snowflake::deserialize(id).map_err(|e| CacheError::malformed(Self::KIND, e))
            })
    }
}

impl Entity for Presence {
    const KIND: &'static str = "presence";

    fn id(&self) -> &Snowflake {
        &self.user_id
    }

    fn from_raw(raw: &Value, key: Option<&Snowflake>) -> Result<Self> {
        let raw: RawPresence = decode(Self::KIND, raw)?;
        let user_id = key
            .cloned()
            .or(raw.user.map(|user| user.id))
            .ok_or_else(|| CacheError::malformed(Self::KIND, "missing field `user.id`"))?;

        Ok(Self {
            user_id,
            guild_id: raw.guild_id,
            status: raw.status.unwrap_or_default(),
            activity: raw.activity.flatten(),
            client_status: raw.client_status.unwrap_or_default(),
            updated_at: Utc::now(),
        })
    }
}

impl Patch for Presence {
    fn patch(&mut self, raw: &Value) -> Result<()> {
        let raw: RawPresence = decode(Self::KIND, raw)?;

        if let Some(guild_id) = raw.guild_id {
            self.guild_id = Some(guild_id);
        }
        if let Some(status) = raw.status {
            self.status = status;
        }
        if let Some(activity) = raw.activity {
            self.activity = activity;
        }
        if let Some(client_status) = raw.client_status {
            self.client_status = client_status;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}
