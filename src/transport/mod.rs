//! Inbound/outbound message transport.
//!
//! The bot only needs four operations from the message platform. They live
//! behind [`Transport`] so a processing cycle can run against Reddit or
//! against [`MemoryTransport`] in tests and dry runs.

mod memory;
mod reddit;

pub use memory::MemoryTransport;
pub use reddit::RedditTransport;

use async_trait::async_trait;

use crate::error::Result;

/// An unread inbox item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundItem {
    /// Platform identifier used to reply and to mark the item read.
    pub id: String,
    pub author: String,
    /// Community the item was posted in; `None` for direct messages.
    pub subreddit: Option<String>,
    pub body: String,
}

impl InboundItem {
    /// A username mention posted in a subreddit.
    pub fn mention(
        id: impl Into<String>,
        author: impl Into<String>,
        subreddit: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            subreddit: Some(subreddit.into()),
            body: body.into(),
        }
    }

    /// A private message.
    pub fn direct(id: impl Into<String>, author: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            author: author.into(),
            subreddit: None,
            body: body.into(),
        }
    }
}

/// Trait defining the message platform operations the bot uses.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Unread inbox items, oldest first.
    async fn unread(&self) -> Result<Vec<InboundItem>>;

    /// Replies to an item.
    async fn reply(&self, item: &InboundItem, text: &str) -> Result<()>;

    /// Creates a standalone post and returns its locator (URL).
    async fn create_post(&self, title: &str, text: &str) -> Result<String>;

    /// Marks an item read so it is not returned by [`Transport::unread`] again.
    async fn mark_consumed(&self, item: &InboundItem) -> Result<()>;
}
