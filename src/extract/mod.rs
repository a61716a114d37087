//! Vehicle statistics extraction from embedded chart scripts.
//!
//! The vehicles page does not expose its table as markup. Instead a script
//! block feeds a chart one `data.addRow([...]);` statement per vehicle, with
//! cells that are either plain literals or `{v: raw, f: 'formatted'}` pairs
//! and HTML snippets for the badge, name and class columns.
//!
//! Extraction runs in three steps per statement:
//! 1. locate the statement and scan its literal to the closing `)`
//! 2. normalize the literal to JSON and decode it
//! 3. project the positional cells into a [`VehicleRecord`]

pub mod literal;
pub mod mastery;

use regex::Regex;
use serde_json::Value;

pub use literal::{decode, normalize_literal, Scanner};
pub use mastery::MasteryBadge;

use crate::config::UnknownIconPolicy;
use crate::error::ExtractError;
use crate::record::Scalar;

/// Cells a chart row must carry.
pub const ROW_COLUMNS: usize = 13;

mod column {
    pub const TIER: usize = 0;
    pub const MASTERY: usize = 1;
    pub const NAME: usize = 3;
    pub const CLASS: usize = 5;
    pub const WIN_RATE: usize = 6;
    pub const WINS: usize = 7;
    pub const BATTLES: usize = 8;
    pub const AVG_DAMAGE: usize = 9;
    pub const BATTLE_SHARE: usize = 10;
    pub const EFFICIENCY: usize = 11;
    pub const WN8: usize = 12;
}

/// One vehicle's statistics for a player.
#[derive(Debug, Clone, PartialEq)]
pub struct VehicleRecord {
    pub tier: Scalar,
    pub mastery: MasteryBadge,
    pub name: String,
    /// Vehicle class taken from the class icon file (`mediumTank`).
    pub class: String,
    /// Preformatted win rate (`51.23%`).
    pub win_rate: String,
    pub wins: Scalar,
    pub battles: Scalar,
    pub avg_damage: Scalar,
    /// Preformatted share of the player's battles spent in this vehicle.
    pub battle_share: String,
    pub efficiency: Scalar,
    pub wn8: Scalar,
}

/// Pulls [`VehicleRecord`]s out of a vehicles page.
#[derive(Debug, Clone)]
pub struct VehicleExtractor {
    add_row: Regex,
    asset_attr: Regex,
    policy: UnknownIconPolicy,
}

impl VehicleExtractor {
    /// Creates an extractor with the given unknown-icon policy.
    pub fn new(policy: UnknownIconPolicy) -> Result<Self, regex::Error> {
        Ok(Self {
            add_row: Regex::new(r"\bdata\s*\.\s*addRow\s*\(")?,
            asset_attr: Regex::new(r#"(?i)\b(?:src|href)\s*=\s*["']([^"']*)["']"#)?,
            policy,
        })
    }

    /// Returns the decoded cell list of every `addRow` statement, in page order.
    pub fn rows(&self, page: &str) -> Result<Vec<Vec<Value>>, ExtractError> {
        let mut rows = Vec::new();

        for (index, found) in self.add_row.find_iter(page).enumerate() {
            let rest = &page[found.end()..];

            let end = {
                let mut scanner = Scanner::new(rest);
                scanner.skip_whitespace();
                scanner.parse_value()?;
                let end = scanner.offset();
                scanner.expect(')')?;
                end
            };

            match decode(&normalize_literal(&rest[..end])?)? {
                Value::Array(cells) => rows.push(cells),
                _ => {
                    return Err(ExtractError::Decode {
                        row: index,
                        column: 0,
                        message: "addRow argument is not an array".to_string(),
                    })
                }
            }
        }

        Ok(rows)
    }

    /// Extracts every vehicle on the page, in page order.
    pub fn extract(&self, page: &str) -> Result<Vec<VehicleRecord>, ExtractError> {
        self.rows(page)?
            .iter()
            .enumerate()
            .map(|(index, cells)| self.project(index, cells))
            .collect()
    }

    /// Maps one row's positional cells onto a record.
    pub fn project(&self, row: usize, cells: &[Value]) -> Result<VehicleRecord, ExtractError> {
        if cells.len() < ROW_COLUMNS {
            return Err(ExtractError::FieldCount {
                row,
                found: cells.len(),
                expected: ROW_COLUMNS,
            });
        }

        let cell = Cell { row, cells };

        Ok(VehicleRecord {
            tier: cell.scalar(column::TIER)?,
            mastery: self.mastery(&cell)?,
            name: strip_tags(cell.text(column::NAME)?),
            class: self.class(&cell)?,
            win_rate: cell.formatted(column::WIN_RATE)?,
            wins: cell.scalar(column::WINS)?,
            battles: cell.scalar(column::BATTLES)?,
            avg_damage: cell.scalar(column::AVG_DAMAGE)?,
            battle_share: cell.formatted(column::BATTLE_SHARE)?,
            efficiency: cell.scalar(column::EFFICIENCY)?,
            wn8: cell.scalar(column::WN8)?,
        })
    }

    fn mastery(&self, cell: &Cell<'_>) -> Result<MasteryBadge, ExtractError> {
        let html = cell.text(column::MASTERY)?;
        if html.trim().is_empty() {
            return Ok(MasteryBadge::None);
        }

        let icon = self
            .asset_file_name(html)
            .ok_or_else(|| cell.error(column::MASTERY, "no icon in mastery cell"))?;

        match MasteryBadge::from_icon(icon) {
            MasteryBadge::Unknown(icon) if self.policy == UnknownIconPolicy::Strict => {
                Err(ExtractError::UnknownIcon(icon))
            }
            badge => Ok(badge),
        }
    }

    fn class(&self, cell: &Cell<'_>) -> Result<String, ExtractError> {
        let html = cell.text(column::CLASS)?;
        self.asset_file_name(html)
            .map(|file| file.split('.').next().unwrap_or(file).to_string())
            .ok_or_else(|| cell.error(column::CLASS, "no icon in class cell"))
    }

    /// File name of the first `src`/`href` in an HTML snippet, without query string.
    fn asset_file_name<'h>(&self, html: &'h str) -> Option<&'h str> {
        let path = self.asset_attr.captures(html)?.get(1)?.as_str();
        let path = path.split(['?', '#']).next().unwrap_or(path);
        path.rsplit('/').next().filter(|name| !name.is_empty())
    }
}

/// Row cells with position-aware error reporting.
struct Cell<'a> {
    row: usize,
    cells: &'a [Value],
}

impl Cell<'_> {
    fn error(&self, column: usize, message: &str) -> ExtractError {
        ExtractError::Decode {
            row: self.row,
            column,
            message: message.to_string(),
        }
    }

    /// Raw value: the `v` half of a `{v, f}` pair, or the cell itself.
    fn raw(&self, column: usize) -> &Value {
        let value = &self.cells[column];
        value.get("v").unwrap_or(value)
    }

    fn scalar(&self, column: usize) -> Result<Scalar, ExtractError> {
        Scalar::from_json(self.raw(column)).ok_or_else(|| self.error(column, "expected a scalar"))
    }

    fn text(&self, column: usize) -> Result<&str, ExtractError> {
        self.raw(column)
            .as_str()
            .ok_or_else(|| self.error(column, "expected a string"))
    }

    /// Display value: the `f` half of a `{v, f}` pair, or the cell rendered as-is.
    fn formatted(&self, column: usize) -> Result<String, ExtractError> {
        match self.cells[column].get("f") {
            Some(Value::String(f)) => Ok(f.clone()),
            Some(other) => Scalar::from_json(other)
                .map(|s| s.to_string())
                .ok_or_else(|| self.error(column, "expected a formatted value")),
            None => self.scalar(column).map(|s| s.to_string()),
        }
    }
}

/// Text content of an HTML snippet.
fn strip_tags(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    text.trim().to_string()
}
