//! Decides which inbox items the bot answers.

use crate::transport::InboundItem;

/// What to do with an inbox item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Disposition {
    /// Mention in an allowed subreddit: answer it.
    Process,
    /// Private message: acknowledged, never answered.
    DirectMessage,
    /// Mention in some other subreddit, named here.
    OutOfScope(String),
}

/// Allow-list of subreddits, compared case-insensitively.
#[derive(Debug, Clone)]
pub struct Scope {
    subreddits: Vec<String>,
}

impl Scope {
    pub fn new<I, S>(subreddits: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            subreddits: subreddits
                .into_iter()
                .map(|s| s.as_ref().trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn classify(&self, item: &InboundItem) -> Disposition {
        match &item.subreddit {
            None => Disposition::DirectMessage,
            Some(subreddit) if self.allows(subreddit) => Disposition::Process,
            Some(subreddit) => Disposition::OutOfScope(subreddit.clone()),
        }
    }

    pub fn allows(&self, subreddit: &str) -> bool {
        self.subreddits
            .iter()
            .any(|s| s.eq_ignore_ascii_case(subreddit.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> Scope {
        Scope::new(["WorldOfTanksConsole", " wotc_bot ", ""])
    }

    #[test]
    fn test_allowed_subreddit_is_case_insensitive() {
        let item = InboundItem::mention("t1_a", "me", "worldoftanksconsole", "/u/wotc_bot");
        assert_eq!(scope().classify(&item), Disposition::Process);
        assert!(scope().allows("WOTC_BOT"));
    }

    #[test]
    fn test_direct_message() {
        let item = InboundItem::direct("t4_a", "me", "hello");
        assert_eq!(scope().classify(&item), Disposition::DirectMessage);
    }

    #[test]
    fn test_out_of_scope() {
        let item = InboundItem::mention("t1_a", "me", "pics", "/u/wotc_bot help");
        assert_eq!(
            scope().classify(&item),
            Disposition::OutOfScope("pics".to_string())
        );
        assert!(!scope().allows(""));
    }
}
