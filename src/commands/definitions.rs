//! Command definitions for declarative command metadata.
//!
//! Every enumerated argument (verb, platform, subcommand) is a closed enum
//! implementing [`Choice`], so parsing, help text and "try one of" messages
//! all come from the same list. `VERBS` describes the usage of each verb.

/// A closed set of keywords accepted at one argument position.
pub trait Choice: Sized + Copy + 'static {
    /// Every variant, in the order shown to users.
    const ALL: &'static [Self];

    /// Canonical keyword.
    fn as_str(&self) -> &'static str;

    /// Extra keywords accepted for this variant.
    fn aliases(&self) -> &'static [&'static str] {
        &[]
    }

    /// Parses an already lowercased token.
    fn parse(token: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.as_str() == token || choice.aliases().contains(&token))
    }

    /// Canonical keywords joined for display: `moe, wn8`.
    fn choices() -> String {
        Self::ALL
            .iter()
            .map(Choice::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Top-level command keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Help,
    Player,
    Clan,
    Tank,
}

impl Choice for Verb {
    const ALL: &'static [Self] = &[Self::Help, Self::Player, Self::Clan, Self::Tank];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Help => "help",
            Self::Player => "player",
            Self::Clan => "clan",
            Self::Tank => "tank",
        }
    }
}

/// Console platform a player or clan plays on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    PlayStation,
    Xbox,
}

impl Choice for Platform {
    const ALL: &'static [Self] = &[Self::PlayStation, Self::Xbox];

    fn as_str(&self) -> &'static str {
        match self {
            Self::PlayStation => "ps",
            Self::Xbox => "xbox",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::PlayStation => &["ps4"],
            Self::Xbox => &[],
        }
    }
}

impl Platform {
    /// Server name used by wotinfo.net.
    pub fn wotinfo_server(&self) -> &'static str {
        match self {
            Self::PlayStation => "ps4",
            Self::Xbox => "xbox",
        }
    }
}

/// `player` subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerView {
    Summary,
    Recent,
    Efficiency,
    Tanks(TanksView),
}

/// Keyword-level `player` subcommand, before `tanks` takes its own argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerSubcommand {
    Summary,
    Recent,
    Efficiency,
    Tanks,
}

impl Choice for PlayerSubcommand {
    const ALL: &'static [Self] = &[Self::Summary, Self::Recent, Self::Efficiency, Self::Tanks];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Recent => "recent",
            Self::Efficiency => "efficiency",
            Self::Tanks => "tanks",
        }
    }
}

/// `player ... tanks` subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TanksView {
    /// Every vehicle in page order.
    Efficiency,
    /// Best vehicles by WN8, then battles.
    Top,
}

impl Choice for TanksView {
    const ALL: &'static [Self] = &[Self::Efficiency, Self::Top];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Efficiency => "efficiency",
            Self::Top => "top",
        }
    }
}

/// `clan` subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClanView {
    Summary,
    Active,
    Battles,
    Players,
    Tier,
    Top,
}

impl Choice for ClanView {
    const ALL: &'static [Self] = &[
        Self::Summary,
        Self::Active,
        Self::Battles,
        Self::Players,
        Self::Tier,
        Self::Top,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Active => "active",
            Self::Battles => "battles",
            Self::Players => "players",
            Self::Tier => "tier",
            Self::Top => "top",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Tier => &["tiers"],
            _ => &[],
        }
    }
}

/// `tank` subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TankView {
    /// Marks of excellence damage thresholds.
    Moe,
    /// WN8 expected values.
    Wn8,
}

impl Choice for TankView {
    const ALL: &'static [Self] = &[Self::Moe, Self::Wn8];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Moe => "moe",
            Self::Wn8 => "wn8",
        }
    }
}

/// Definition of a verb for help output.
#[derive(Debug, Clone)]
pub struct VerbDef {
    pub verb: Verb,
    /// Usage line with `PLAT` standing for a platform keyword.
    pub usage: &'static str,
}

/// All verb definitions, in help order.
pub static VERBS: &[VerbDef] = &[
    VerbDef {
        verb: Verb::Help,
        usage: "help",
    },
    VerbDef {
        verb: Verb::Player,
        usage: "player PLAT {summary, recent, efficiency} NAME",
    },
    VerbDef {
        verb: Verb::Player,
        usage: "player PLAT tanks {efficiency, top} NAME",
    },
    VerbDef {
        verb: Verb::Clan,
        usage: "clan PLAT {summary, active, battles, players, tier, top} NAME",
    },
    VerbDef {
        verb: Verb::Tank,
        usage: "tank PLAT {moe, wn8} TANK",
    },
];
