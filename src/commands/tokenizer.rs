//! Tokenizer for inbound command text.
//!
//! Commands are plain whitespace-separated words matched case-insensitively,
//! so tokenizing is a split plus case folding. The helpers here answer the
//! questions the router asks about the first token.

/// Character that marks the first token as a username mention (`/u/wotc_bot`).
pub const MENTION_MARKER: char = '/';

/// Phrases that earn a thank-you instead of a command response ("good bot").
pub const COURTESY_PHRASES: &[&str] = &["good"];

/// Splits input on whitespace and lowercases every token.
pub fn tokenize(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_lowercase).collect()
}

/// Returns true if the token is a mention of some account or community.
pub fn is_mention(token: &str) -> bool {
    token.contains(MENTION_MARKER)
}

/// Returns true if the token opens a courtesy phrase.
pub fn is_courtesy(token: &str) -> bool {
    COURTESY_PHRASES.contains(&token)
}

/// Returns the name part of a mention: `/u/wotc_bot` → `wotc_bot`.
pub fn mention_name(token: &str) -> &str {
    token.rsplit(MENTION_MARKER).next().unwrap_or(token)
}

/// Joins the tokens from `start` onward into a single name argument.
pub fn rest_from(tokens: &[String], start: usize) -> String {
    tokens.get(start..).map(|t| t.join(" ")).unwrap_or_default()
}
