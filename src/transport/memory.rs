//! In-memory transport for tests and dry runs.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{InboundItem, Transport};
use crate::error::{BotError, Result};

/// A transport that serves a fixed inbox and records everything sent.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    inbox: Vec<InboundItem>,
    failing_replies: Vec<String>,
    replies: Mutex<Vec<(String, String)>>,
    posts: Mutex<Vec<(String, String)>>,
    consumed: Mutex<Vec<String>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item to the inbox.
    pub fn with_item(mut self, item: InboundItem) -> Self {
        self.inbox.push(item);
        self
    }

    /// Makes every reply to the item with this id fail.
    pub fn failing_replies_to(mut self, id: impl Into<String>) -> Self {
        self.failing_replies.push(id.into());
        self
    }

    /// (item id, text) of every reply sent.
    pub fn replies(&self) -> Vec<(String, String)> {
        self.replies.lock().map(|r| r.clone()).unwrap_or_default()
    }

    /// (title, text) of every post created.
    pub fn posts(&self) -> Vec<(String, String)> {
        self.posts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Ids of items marked consumed, in order.
    pub fn consumed(&self) -> Vec<String> {
        self.consumed.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn is_consumed(&self, id: &str) -> bool {
        self.consumed
            .lock()
            .map(|c| c.iter().any(|consumed| consumed == id))
            .unwrap_or(false)
    }
}

fn poisoned<T>(_: T) -> BotError {
    BotError::internal("memory transport lock poisoned")
}

#[async_trait]
impl Transport for MemoryTransport {
    async fn unread(&self) -> Result<Vec<InboundItem>> {
        Ok(self
            .inbox
            .iter()
            .filter(|item| !self.is_consumed(&item.id))
            .cloned()
            .collect())
    }

    async fn reply(&self, item: &InboundItem, text: &str) -> Result<()> {
        if self.failing_replies.contains(&item.id) {
            return Err(BotError::transport(format!("reply to {} rejected", item.id)));
        }
        self.replies
            .lock()
            .map_err(poisoned)?
            .push((item.id.clone(), text.to_string()));
        Ok(())
    }

    async fn create_post(&self, title: &str, text: &str) -> Result<String> {
        let mut posts = self.posts.lock().map_err(poisoned)?;
        posts.push((title.to_string(), text.to_string()));
        Ok(format!("memory://posts/{}", posts.len()))
    }

    async fn mark_consumed(&self, item: &InboundItem) -> Result<()> {
        self.consumed.lock().map_err(poisoned)?.push(item.id.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_consumed_items_leave_inbox() {
        let transport = MemoryTransport::new()
            .with_item(InboundItem::direct("t4_1", "someone", "hi"))
            .with_item(InboundItem::mention("t1_2", "other", "wotc_bot", "/u/wotc_bot"));

        let unread = transport.unread().await.unwrap();
        assert_eq!(unread.len(), 2);

        transport.mark_consumed(&unread[0]).await.unwrap();
        let unread = transport.unread().await.unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].id, "t1_2");
    }

    #[tokio::test]
    async fn test_posts_get_locators() {
        let transport = MemoryTransport::new();
        assert_eq!(
            transport.create_post("Response to a", "x").await.unwrap(),
            "memory://posts/1"
        );
        assert_eq!(
            transport.create_post("Response to b", "y").await.unwrap(),
            "memory://posts/2"
        );
        assert_eq!(transport.posts()[1].0, "Response to b");
    }

    #[tokio::test]
    async fn test_failing_reply() {
        let item = InboundItem::direct("t4_9", "someone", "hi");
        let transport = MemoryTransport::new().failing_replies_to("t4_9");

        assert!(transport.reply(&item, "text").await.is_err());
        assert!(transport.replies().is_empty());
    }
}
