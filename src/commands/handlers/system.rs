//! Replies that need no provider (help, courtesy, unknown verb).

use crate::commands::help;

/// Handle a bare mention or `help`.
pub fn handle_help(mention: &str) -> String {
    help::help_text(mention)
}

/// Handle "good bot".
pub fn handle_courtesy() -> String {
    help::THANK_YOU_TEXT.to_string()
}

/// Handle an unknown verb. `origin` is the name the bot was summoned by.
pub fn handle_invalid_verb(origin: &str) -> String {
    help::invalid_verb_text(origin)
}
