//! Channels and their recipients.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use super::{Snowflake, User};
use crate::cache::{CrossLink, Handle};

/// A private or group channel.
#[derive(Debug)]
pub struct Channel {
    pub id: Snowflake,
    recipients: RwLock<IndexMap<Snowflake, Handle<User>>>,
}

impl Channel {
    pub fn new(id: impl Into<Snowflake>) -> Self {
        Self {
            id: id.into(),
            recipients: RwLock::new(IndexMap::new()),
        }
    }

    /// Add a recipient. Users are equal when their ids are; adding an equal
    /// user again swaps in the newer handle and returns `false`.
    pub fn add_recipient(&self, user: &Handle<User>) -> bool {
        let id = user.read().id.clone();
        self.recipients
            .write()
            .insert(id, Arc::clone(user))
            .is_none()
    }

    /// Recipients in the order they were first added.
    pub fn recipients(&self) -> Vec<Handle<User>> {
        self.recipients.read().values().cloned().collect()
    }

    pub fn has_recipient(&self, user_id: &str) -> bool {
        self.recipients.read().contains_key(user_id)
    }
}

impl CrossLink<User> for Channel {
    fn link(&self, _key: &Snowflake, entity: &Handle<User>) {
        self.add_recipient(entity);
    }
}
