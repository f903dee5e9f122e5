//! Messages.

use super::{Snowflake, User};
use crate::cache::Handle;

/// A message. Owns its author one hop away.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub content: String,
    author: Handle<User>,
}

impl Message {
    pub fn new(
        id: impl Into<Snowflake>,
        channel_id: impl Into<Snowflake>,
        author: Handle<User>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            channel_id: channel_id.into(),
            content: content.into(),
            author,
        }
    }

    pub fn author(&self) -> &Handle<User> {
        &self.author
    }
}
