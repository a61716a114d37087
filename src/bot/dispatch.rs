//! Reply delivery with the comment length limit.

use crate::error::Result;
use crate::transport::{InboundItem, Transport};

/// How a report reached its requester.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Posted directly as a reply.
    Replied,
    /// Too long for a reply: posted separately and linked from a short reply.
    Posted { locator: String, length: usize },
}

/// Reply that points at the auxiliary post.
pub fn oversize_notice(max_len: usize, length: usize, locator: &str) -> String {
    format!(
        "I'm sorry, it appears my response is greater than the maximum allowed comment \
         length. (Max: {max_len}, Mine: {length}). I have created a self-post at {locator}"
    )
}

/// Sends `report` as a reply to `item`, or as a post plus pointer reply when
/// it exceeds `max_len` characters. The report is never truncated.
pub async fn deliver(
    transport: &dyn Transport,
    item: &InboundItem,
    report: &str,
    max_len: usize,
) -> Result<Delivery> {
    let length = report.chars().count();
    if length <= max_len {
        transport.reply(item, report).await?;
        return Ok(Delivery::Replied);
    }

    let title = format!("Response to {}", item.author);
    let locator = transport.create_post(&title, report).await?;
    tracing::info!(id = %item.id, length, %locator, "report too long, created post");

    transport
        .reply(item, &oversize_notice(max_len, length, &locator))
        .await?;

    Ok(Delivery::Posted { locator, length })
}
