//! Mastery badge lookup.

use std::fmt;

/// Mastery badge earned on a vehicle, as shown by the chart's rank icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MasteryBadge {
    Ace,
    First,
    Second,
    Third,
    /// Blank placeholder icon: no badge earned.
    None,
    /// Icon file not in the table.
    Unknown(String),
}

impl MasteryBadge {
    /// Maps an icon file name (`rank_01.png`) to its badge. Total over all inputs.
    pub fn from_icon(file_name: &str) -> Self {
        match file_name {
            "rank_m.png" => Self::Ace,
            "rank_01.png" => Self::First,
            "rank_02.png" => Self::Second,
            "rank_03.png" => Self::Third,
            "FFFFFF-0.png" | "" => Self::None,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Short label used in report tables.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Ace => "M",
            Self::First => "1",
            Self::Second => "2",
            Self::Third => "3",
            Self::None => "",
            Self::Unknown(_) => "?",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for MasteryBadge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
