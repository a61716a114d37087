//! Command parsing and routing.
//!
//! Parses inbound text into structured commands. Parsing performs every
//! token-count and keyword check, so a rejected request never reaches a
//! provider.

use super::definitions::{
    Choice, ClanView, Platform, PlayerSubcommand, PlayerView, TankView, TanksView, Verb,
};
use super::help;
use super::tokenizer::{is_courtesy, is_mention, mention_name, rest_from, tokenize};

/// Arguments for a `player` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRequest {
    pub platform: Platform,
    pub view: PlayerView,
    /// Player name, lowercased, spaces preserved.
    pub name: String,
}

/// Arguments for a `clan` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClanRequest {
    pub platform: Platform,
    pub view: ClanView,
    pub tag: String,
}

/// Arguments for a `tank` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TankRequest {
    pub platform: Platform,
    pub view: TankView,
    pub name: String,
}

/// Parsed command with arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the help report. `mention` is the name the bot was called by.
    Help { mention: String },
    /// Reply to a courtesy phrase.
    Courtesy,
    /// The word after the mention is not a verb.
    InvalidVerb { origin: String },
    Player(PlayerRequest),
    Clan(ClanRequest),
    Tank(TankRequest),
    /// The verb was valid but its arguments were not; carries the reply.
    Rejected(String),
}

/// Command router for parsing inbound text.
pub struct CommandRouter;

impl CommandRouter {
    /// Parses message text into a Command, or `None` if it is not addressed to the bot.
    pub fn parse(input: &str) -> Option<Command> {
        Self::parse_tokens(&tokenize(input))
    }

    /// Parses pre-tokenized (lowercased) input.
    pub fn parse_tokens(tokens: &[String]) -> Option<Command> {
        let first = tokens.first()?;

        if tokens.len() == 1 {
            return Some(Command::Help {
                mention: mention_name(first).to_string(),
            });
        }

        if !is_mention(first) {
            return is_courtesy(first).then_some(Command::Courtesy);
        }

        let command = match Verb::parse(&tokens[1]) {
            None => Command::InvalidVerb {
                origin: mention_name(first).to_string(),
            },
            Some(Verb::Help) => Command::Help {
                mention: mention_name(first).to_string(),
            },
            Some(Verb::Player) => Self::parse_player(tokens),
            Some(Verb::Clan) => Self::parse_clan(tokens),
            Some(Verb::Tank) => Self::parse_tank(tokens),
        };

        Some(command)
    }

    /// `MENTION player PLAT {summary|recent|efficiency} NAME...`
    /// `MENTION player PLAT tanks {efficiency|top} NAME...`
    fn parse_player(tokens: &[String]) -> Command {
        if tokens.len() < 4 {
            return Command::Rejected(help::MALFORMED_REQUEST.to_string());
        }

        let Some(platform) = Platform::parse(&tokens[2]) else {
            return Command::Rejected(help::bad_platform_text());
        };

        let Some(subcommand) = PlayerSubcommand::parse(&tokens[3]) else {
            return Command::Rejected(help::bad_subcommand_text(&tokens[3]));
        };

        let (view, name_start) = match subcommand {
            PlayerSubcommand::Summary => (PlayerView::Summary, 4),
            PlayerSubcommand::Recent => (PlayerView::Recent, 4),
            PlayerSubcommand::Efficiency => (PlayerView::Efficiency, 4),
            PlayerSubcommand::Tanks => {
                let Some(token) = tokens.get(4) else {
                    return Command::Rejected(help::MALFORMED_REQUEST.to_string());
                };
                let Some(tanks) = TanksView::parse(token) else {
                    return Command::Rejected(help::bad_subcommand_text(token));
                };
                (PlayerView::Tanks(tanks), 5)
            }
        };

        let name = rest_from(tokens, name_start);
        if name.is_empty() {
            return Command::Rejected(help::MALFORMED_REQUEST.to_string());
        }

        Command::Player(PlayerRequest {
            platform,
            view,
            name,
        })
    }

    /// `MENTION clan PLAT {summary|active|battles|players|tier|top} TAG`
    fn parse_clan(tokens: &[String]) -> Command {
        if tokens.len() < 3 {
            return Command::Rejected(help::MISSING_CLAN_NAME.to_string());
        }

        let Some(platform) = Platform::parse(&tokens[2]) else {
            return Command::Rejected(help::bad_platform_text());
        };

        if tokens.len() < 5 {
            return Command::Rejected(help::MISSING_CLAN_NAME.to_string());
        }

        let Some(view) = ClanView::parse(&tokens[3]) else {
            return Command::Rejected(help::invalid_subcommand_text(
                Verb::Clan.as_str(),
                &ClanView::choices(),
            ));
        };

        Command::Clan(ClanRequest {
            platform,
            view,
            tag: tokens[4].clone(),
        })
    }

    /// `MENTION tank PLAT {moe|wn8} NAME...`
    fn parse_tank(tokens: &[String]) -> Command {
        if tokens.len() < 3 {
            return Command::Rejected(help::MISSING_TANK_NAME.to_string());
        }

        let Some(platform) = Platform::parse(&tokens[2]) else {
            return Command::Rejected(help::bad_platform_text());
        };

        if tokens.len() < 5 {
            return Command::Rejected(help::MISSING_TANK_NAME.to_string());
        }

        let Some(view) = TankView::parse(&tokens[3]) else {
            return Command::Rejected(help::invalid_subcommand_text(
                Verb::Tank.as_str(),
                &TankView::choices(),
            ));
        };

        Command::Tank(TankRequest {
            platform,
            view,
            name: rest_from(tokens, 4),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(input: &str) -> String {
        match CommandRouter::parse(input) {
            Some(Command::Rejected(msg)) => msg,
            other => panic!("expected rejection for {input:?}, got {other:?}"),
        }
    }

    /// Fills a help usage line with the first listed option and a one-word name.
    fn usage_example(usage: &str) -> String {
        let mut filled = Vec::new();
        let mut options = false;
        for word in usage.split_whitespace() {
            if options {
                options = !word.ends_with('}');
                continue;
            }
            match word {
                "PLAT" => filled.push("xbox".to_string()),
                "NAME" | "TANK" => filled.push("rddt".to_string()),
                w if w.starts_with('{') => {
                    filled.push(w.trim_matches(|c| c == '{' || c == ',' || c == '}').to_string());
                    options = !w.ends_with('}');
                }
                w => filled.push(w.to_string()),
            }
        }
        format!("/u/wotc_bot {}", filled.join(" "))
    }

    #[test]
    fn test_help_usage_lines_agree_with_parser() {
        use crate::commands::definitions::VERBS;

        for def in VERBS.iter().filter(|def| def.verb != Verb::Help) {
            let example = usage_example(def.usage);
            let parsed = CommandRouter::parse(&example);
            assert!(
                matches!(
                    parsed,
                    Some(Command::Player(_) | Command::Clan(_) | Command::Tank(_))
                ),
                "{example:?} parsed as {parsed:?}"
            );

            let short = example.rsplit_once(' ').map(|(head, _)| head).unwrap();
            assert!(
                matches!(CommandRouter::parse(short), Some(Command::Rejected(_))),
                "{short:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_bare_mention_is_help() {
        assert_eq!(
            CommandRouter::parse("/u/WOTC_BOT"),
            Some(Command::Help {
                mention: "wotc_bot".to_string()
            })
        );
    }

    #[test]
    fn test_help_verb() {
        assert!(matches!(
            CommandRouter::parse("/u/wotc_bot help me please"),
            Some(Command::Help { .. })
        ));
    }

    #[test]
    fn test_non_mention_is_ignored() {
        assert_eq!(CommandRouter::parse("what a game that was"), None);
        assert_eq!(CommandRouter::parse(""), None);
    }

    #[test]
    fn test_courtesy() {
        assert_eq!(CommandRouter::parse("Good bot"), Some(Command::Courtesy));
    }

    #[test]
    fn test_unknown_verb() {
        assert_eq!(
            CommandRouter::parse("/u/wotc_bot stats xbox me"),
            Some(Command::InvalidVerb {
                origin: "wotc_bot".to_string()
            })
        );
    }

    #[test]
    fn test_player_summary() {
        assert_eq!(
            CommandRouter::parse("/u/wotc_bot player xbox summary DEZERTstorm03"),
            Some(Command::Player(PlayerRequest {
                platform: Platform::Xbox,
                view: PlayerView::Summary,
                name: "dezertstorm03".to_string(),
            }))
        );
    }

    #[test]
    fn test_player_tanks_top_with_spaced_name() {
        assert_eq!(
            CommandRouter::parse("/u/wotc_bot player ps4 tanks top Big Tank Guy"),
            Some(Command::Player(PlayerRequest {
                platform: Platform::PlayStation,
                view: PlayerView::Tanks(TanksView::Top),
                name: "big tank guy".to_string(),
            }))
        );
    }

    #[test]
    fn test_player_rejections() {
        assert_eq!(rejected("/u/b player xbox"), help::MALFORMED_REQUEST);
        assert_eq!(rejected("/u/b player"), help::MALFORMED_REQUEST);
        assert_eq!(rejected("/u/b player pc summary x"), help::bad_platform_text());
        assert_eq!(
            rejected("/u/b player xbox stats x"),
            help::bad_subcommand_text("stats")
        );
        assert_eq!(rejected("/u/b player xbox tanks"), help::MALFORMED_REQUEST);
        assert_eq!(
            rejected("/u/b player xbox tanks worst x"),
            help::bad_subcommand_text("worst")
        );
        assert_eq!(rejected("/u/b player xbox summary"), help::MALFORMED_REQUEST);
        assert_eq!(rejected("/u/b player xbox tanks top"), help::MALFORMED_REQUEST);
    }

    #[test]
    fn test_clan() {
        assert_eq!(
            CommandRouter::parse("/u/wotc_bot clan ps tiers RDDT"),
            Some(Command::Clan(ClanRequest {
                platform: Platform::PlayStation,
                view: ClanView::Tier,
                tag: "rddt".to_string(),
            }))
        );
    }

    #[test]
    fn test_clan_rejections() {
        assert_eq!(rejected("/u/b clan"), help::MISSING_CLAN_NAME);
        assert_eq!(rejected("/u/b clan xbox summary"), help::MISSING_CLAN_NAME);
        assert_eq!(rejected("/u/b clan steam summary rddt"), help::bad_platform_text());
        let msg = rejected("/u/b clan xbox roster rddt");
        assert!(msg.starts_with("Invalid clan command"));
        assert!(msg.ends_with("summary, active, battles, players, tier, top"));
    }

    #[test]
    fn test_tank() {
        assert_eq!(
            CommandRouter::parse("/u/wotc_bot tank xbox moe T-62A Sport"),
            Some(Command::Tank(TankRequest {
                platform: Platform::Xbox,
                view: TankView::Moe,
                name: "t-62a sport".to_string(),
            }))
        );
    }

    #[test]
    fn test_tank_rejections() {
        assert_eq!(rejected("/u/b tank xbox moe"), help::MISSING_TANK_NAME);
        assert_eq!(rejected("/u/b tank ps2 moe is-7"), help::bad_platform_text());
        assert_eq!(
            rejected("/u/b tank xbox price is-7"),
            help::invalid_subcommand_text("tank", "moe, wn8")
        );
    }
}
