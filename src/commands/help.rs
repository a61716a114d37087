//! Help text and fixed reply messages.

use super::definitions::{Choice, Platform, VERBS};

/// Builds the help reply. `mention` is the name the bot was summoned as.
pub fn help_text(mention: &str) -> String {
    let platforms = Platform::ALL
        .iter()
        .map(|p| format!("* {}", p.as_str()))
        .collect::<Vec<_>>()
        .join("\n");

    let commands = VERBS
        .iter()
        .map(|def| format!("* {}", def.usage))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Hi there! Thank you for choosing to use this bot.\n\n\
         # Valid Platform Names\n\n\
         {platforms}\n\n\
         # Valid Commands\n\n\
         (Note: Replace PLAT with a platform from above)\n\n\
         {commands}\n\n\
         # Example Usage\n\n\
         `/u/{mention} clan xbox summary RDDT`\n\n\
         `/u/{mention} player xbox summary DEZERTstorm03`"
    )
}

/// Reply to "good bot".
pub const THANK_YOU_TEXT: &str = "Thank you! I may not be handsome, but I hope you at least find me \
handy!\n\n\
Credit for my development goes to \
[KamikazeRusher](https://reddit.com/u/KamikazeRusher). Credit for data goes to \
the author of the cited source(s).";

/// Reply when the word after the mention is not a verb.
pub fn invalid_verb_text(origin: &str) -> String {
    format!(
        "Oops! Your first command is not valid. Please review your spelling and try again. \
         If you continue to have this issue, please check the wiki over at /r/{origin} or \
         ask a mod there for help."
    )
}

pub const MALFORMED_REQUEST: &str = "Something is wrong with your request. Please retry!";

pub const MISSING_CLAN_NAME: &str = "No clan name entered. Please retry!";

pub const MISSING_TANK_NAME: &str = "No tank name entered. Please retry!";

pub fn bad_platform_text() -> String {
    let names = Platform::ALL
        .iter()
        .map(|p| format!("\"{}\"", p.as_str()))
        .collect::<Vec<_>>()
        .join(" or ");
    format!("Bad platform. Please use {names} and try again!")
}

pub fn bad_subcommand_text(subcommand: &str) -> String {
    format!("Bad subcommand request \"{subcommand}\". Please retry!")
}

/// `kind` is the verb (`clan`, `tank`), `choices` the valid subcommands.
pub fn invalid_subcommand_text(kind: &str, choices: &str) -> String {
    format!("Invalid {kind} command. Please try one of the following: {choices}")
}

pub const PLAYER_NOT_FOUND: &str = "Sorry, it looks like you either have an invalid player \
name or the wrong platform in your request. Please review your query and try again. If you \
are still having issues, please contact my author for assistance!";

pub const UNEXPECTED_RESPONSE: &str = "I did not receive an expected response, which means \
you may have entered the wrong player name or platform by accident. Please review your \
request and try again!";

pub const EMPTY_RESULT: &str = "The stats site did not return any records for that request. \
If the name is right, there may simply be nothing to show yet!";

pub const NOT_FOUND_RESULT: &str = "The stats site has no record matching that request. \
Check the spelling of the name and the platform, then try again!";

pub const TANK_NOT_FOUND: &str =
    "The API does not appear to accept your tank. Perhaps you misspelled?";

pub fn provider_status_text(status: u16) -> String {
    format!("I received an error code of {status} from the server. Please try again later!")
}

pub fn provider_unreachable_text(url: &str) -> String {
    format!("I could not reach {url} just now. Please try again later!")
}

/// A follow-up page failed after the player was found. `what` names the page.
pub fn player_detail_failure_text(what: &str, maintainer: &str) -> String {
    format!(
        "I was able to find this user on wotinfo but I experienced an error accessing their \
         {what}. Tagging /u/{maintainer} to review this when they get the mention notification."
    )
}

pub fn missing_field_text(field: &str) -> String {
    format!(
        "The stats site sent a response without the \"{field}\" value, so I cannot build \
         that report right now. Sorry!"
    )
}

pub fn clan_unavailable_text(url: &str) -> String {
    format!(
        "There appears to be an error at {url}. If your clan is not yet added to the site \
         database, please follow instructions at https://wotclans.com.br/About#addClan to \
         have it added. Sorry!"
    )
}

pub fn clan_decode_failure_text(tag: &str) -> String {
    format!(
        "Data returned by the website is not in a valid JSON format. You may manually check \
         this at https://wotclans.com.br/Clan/{tag}, but I'm afraid that I cannot properly \
         respond to your request at this time. Sorry!\n\n\
         ¯\\\\\\_(ツ)\\_/¯"
    )
}

pub fn unknown_badge_text(icon: &str, maintainer: &str) -> String {
    format!(
        "Sorry! The vehicle statistics use a mastery badge I do not recognize (`{icon}`), \
         so I cannot build this report. Tagging /u/{maintainer} to teach me about it."
    )
}

pub fn unreadable_vehicles_text(maintainer: &str) -> String {
    format!(
        "Sorry! The vehicle statistics page was in a format I could not read. \
         Tagging /u/{maintainer} to review this when they get the mention notification."
    )
}
