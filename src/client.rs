//! Client context owning the top-level caches.

use std::sync::Arc;

use tracing::info;

use crate::cache::Handle;
use crate::config::Config;
use crate::error::Result;
use crate::stores::{PresenceCache, UserCache};
use crate::structures::{Snowflake, User};
use crate::transport::Transport;

/// Entry point: the user and presence caches, wired to one transport.
#[derive(Debug, Clone)]
pub struct Client {
    config: Config,
    users: Arc<UserCache>,
    presences: PresenceCache,
}

impl Client {
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Self {
        let users = Arc::new(UserCache::new(&config.users, transport));
        let presences = PresenceCache::new(&config.presences, users.clone());

        info!(
            "Entity caches initialized (users: {}, presences: {})",
            config.users.initial_capacity, config.presences.initial_capacity
        );

        Self {
            config,
            users,
            presences,
        }
    }

    /// Build a client from environment configuration.
    pub fn from_env(transport: Arc<dyn Transport>) -> Self {
        Self::new(Config::from_env(), transport)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn users(&self) -> &UserCache {
        &self.users
    }

    pub fn presences(&self) -> &PresenceCache {
        &self.presences
    }

    /// Fetch a user, caching it per `Config::cache_fetched_users`.
    pub async fn fetch_user(&self, id: &Snowflake) -> Result<Handle<User>> {
        self.users.fetch(id, self.config.cache_fetched_users).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::AddOptions;
    use crate::structures::{Guild, Message};
    use crate::transport::tests::MockTransport;
    use serde_json::json;

    fn transport() -> Arc<MockTransport> {
        Arc::new(
            MockTransport::new()
                .with_user(json!({"id": "42", "username": "Ann", "discriminator": "0001"})),
        )
    }

    #[tokio::test]
    async fn test_fetched_user_resolves_presence() -> anyhow::Result<()> {
        crate::logging::init();
        let client = Client::new(Config::default(), transport());
        let guild = Guild::new("G1", "Rustaceans");

        let ann = client.fetch_user(&Snowflake::from("42")).await?;
        client.presences().add(
            &json!({"user": {"id": "42"}, "status": "online"}),
            AddOptions::new().link(&guild),
        )?;

        let message = Message::new("M1", "C1", Arc::clone(&ann), "hello");
        let presence = client.presences().resolve(&message).expect("presence");
        assert!(Arc::ptr_eq(&presence, &guild.presence("42").expect("linked")));
        assert_eq!(client.presences().resolve_id("Ann#0001"), Some(Snowflake::from("42")));
        Ok(())
    }

    #[tokio::test]
    async fn test_fetch_respects_config() -> anyhow::Result<()> {
        let transport = transport();
        let config = Config {
            cache_fetched_users: false,
            ..Config::default()
        };
        let client = Client::new(config, transport.clone());

        client.fetch_user(&Snowflake::from("42")).await?;
        client.fetch_user(&Snowflake::from("42")).await?;

        assert!(client.users().get("42").is_none());
        assert_eq!(transport.calls(), 2);
        Ok(())
    }
}
