//! Inbox processing.
//!
//! One cycle reads the unread inbox and handles each item in order: scope
//! check, routing, delivery, then marking the item read. A failure in any of
//! those steps is logged and the cycle moves on; every item is marked read
//! whatever happened to it.

pub mod dispatch;
pub mod scope;

pub use dispatch::{deliver, Delivery};
pub use scope::{Disposition, Scope};

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::commands::Responder;
use crate::config::Config;
use crate::error::Result;
use crate::provider::HttpFetch;
use crate::transport::{InboundItem, Transport};

/// Counts for one processing cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// Items read from the inbox.
    pub seen: usize,
    /// Items answered with a reply.
    pub replied: usize,
    /// Items whose report went to an auxiliary post.
    pub posted: usize,
    /// In-scope items that were not requests.
    pub ignored: usize,
    /// Direct messages and out-of-scope mentions.
    pub skipped: usize,
    /// Items whose delivery failed.
    pub failed: usize,
}

/// The bot: a transport, a responder and the scope rules.
pub struct Bot {
    transport: Arc<dyn Transport>,
    responder: Responder,
    scope: Scope,
    max_reply_len: usize,
}

impl Bot {
    pub fn new(config: &Config, transport: Arc<dyn Transport>, fetcher: Arc<dyn HttpFetch>) -> Result<Self> {
        Ok(Self {
            transport,
            responder: Responder::new(config, fetcher)?,
            scope: Scope::new(&config.bot.subreddits),
            max_reply_len: config.bot.max_reply_len,
        })
    }

    /// Processes every unread item once.
    ///
    /// Only a failure to read the inbox is returned as an error.
    pub async fn run_cycle(&self) -> Result<CycleStats> {
        let items = self.transport.unread().await?;
        let mut stats = CycleStats {
            seen: items.len(),
            ..CycleStats::default()
        };

        for item in &items {
            self.handle_item(item, &mut stats).await;

            if let Err(e) = self.transport.mark_consumed(item).await {
                error!(id = %item.id, "{}: {}", e.category(), e);
            }
        }

        info!(
            seen = stats.seen,
            replied = stats.replied,
            posted = stats.posted,
            skipped = stats.skipped,
            failed = stats.failed,
            "cycle complete"
        );
        Ok(stats)
    }

    async fn handle_item(&self, item: &InboundItem, stats: &mut CycleStats) {
        match self.scope.classify(item) {
            Disposition::DirectMessage => {
                warn!(author = %item.author, "received direct message");
                stats.skipped += 1;
                return;
            }
            Disposition::OutOfScope(subreddit) => {
                warn!(author = %item.author, %subreddit, "message is outside of our scope");
                stats.skipped += 1;
                return;
            }
            Disposition::Process => {}
        }

        let Some(report) = self.responder.route(&item.body).await else {
            debug!(id = %item.id, "not a request");
            stats.ignored += 1;
            return;
        };

        match deliver(self.transport.as_ref(), item, &report, self.max_reply_len).await {
            Ok(Delivery::Replied) => stats.replied += 1,
            Ok(Delivery::Posted { .. }) => stats.posted += 1,
            Err(e) => {
                error!(id = %item.id, "{}: {}", e.category(), e);
                stats.failed += 1;
            }
        }
        debug!(id = %item.id, "completed message");
    }

    /// Runs cycles until interrupted, sleeping `interval` between them.
    pub async fn run(&self, interval: Duration) -> Result<()> {
        loop {
            if let Err(e) = self.run_cycle().await {
                error!("{}: {}", e.category(), e);
            }

            tokio::select! {
                _ = tokio::time::sleep(interval) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted, shutting down");
                    return Ok(());
                }
            }
        }
    }
}
