//! Player reports built from wotinfo.net pages.

use super::{Report, Table};
use crate::commands::definitions::TanksView;
use crate::error::ReportError;
use crate::extract::VehicleRecord;
use crate::provider::{PlayerSummary, RecentRow, TrendRow};

/// Vehicles shown by `tanks top`.
pub const TOP_VEHICLES: usize = 10;

/// Cells in a complete trend row.
pub const TREND_COLUMNS: usize = 7;

const TOP_NOTE: &str = "*Note: These tanks are sorted by WN8 and Total battles. This sorting is \
arbitrary and may not accurately reflect the overall performance of the player*";

const VEHICLE_HEADERS: [&str; 11] = [
    "Tier",
    "Mastery",
    "Name",
    "Type",
    "Win rate",
    "Wins",
    "Battles",
    "Avg Dmg",
    "Percent of all battles",
    "Efficiency",
    "WN8",
];

/// Career averages: Eff, WN7 and WN8.
pub fn summary(name: &str, stats: &PlayerSummary, source: &str) -> Result<Report, ReportError> {
    let mut table = Table::new(["Stat", "Career Average"]);
    for label in ["Eff", "WN7", "WN8"] {
        let value = stats.get(label).ok_or(ReportError::Schema(label))?;
        table.push_row([label, value]);
    }

    Ok(Report::titled(name).table(&table).source(source))
}

/// Week, month and lifetime figures.
pub fn recent(name: &str, rows: &[RecentRow], source: &str) -> Result<Report, ReportError> {
    if rows.is_empty() {
        return Err(ReportError::Empty);
    }

    let mut table = Table::new(["Stat", "Week", "Month", "Overall"]);
    for row in rows {
        table.push_row([&row.title, &row.week, &row.month, &row.overall]);
    }

    Ok(Report::titled(name).table(&table).source(source))
}

/// Efficiency trend, one line per period.
pub fn trend(name: &str, rows: &[TrendRow], source: &str) -> Result<Report, ReportError> {
    if rows.is_empty() {
        return Err(ReportError::Empty);
    }

    let mut table = Table::new(["From", "To", "Efficiency", "WN7", "WN8", "Battles", "Wins"]);
    for row in rows {
        if row.cells.len() < TREND_COLUMNS {
            return Err(ReportError::FieldCount {
                expected: TREND_COLUMNS,
                found: row.cells.len(),
            });
        }
        table.push_row(&row.cells[..TREND_COLUMNS]);
    }

    Ok(Report::titled(name).table(&table).source(source))
}

/// Per-vehicle statistics, either every vehicle in page order or the top ones.
pub fn tanks(
    name: &str,
    view: TanksView,
    vehicles: &[VehicleRecord],
    source: &str,
) -> Result<Report, ReportError> {
    if vehicles.is_empty() {
        return Err(ReportError::Empty);
    }

    let (report, shown): (Report, Vec<&VehicleRecord>) = match view {
        TanksView::Efficiency => (Report::titled(name), vehicles.iter().collect()),
        TanksView::Top => (Report::titled(name).section(TOP_NOTE), sort_top(vehicles)),
    };

    let mut table = Table::new(VEHICLE_HEADERS);
    for vehicle in shown {
        table.push_row(vehicle_cells(vehicle));
    }

    Ok(report.table(&table).source(source))
}

/// Best vehicles: WN8 descending, then battles descending, ties in page order.
pub fn sort_top(vehicles: &[VehicleRecord]) -> Vec<&VehicleRecord> {
    let mut sorted: Vec<&VehicleRecord> = vehicles.iter().collect();
    // sort_by is stable
    sorted.sort_by(|a, b| a.wn8.cmp_desc(&b.wn8).then_with(|| a.battles.cmp_desc(&b.battles)));
    sorted.truncate(TOP_VEHICLES);
    sorted
}

fn vehicle_cells(v: &VehicleRecord) -> [String; 11] {
    [
        v.tier.to_string(),
        v.mastery.label().to_string(),
        v.name.clone(),
        v.class.clone(),
        v.win_rate.clone(),
        v.wins.to_string(),
        v.battles.to_string(),
        v.avg_damage.to_string(),
        v.battle_share.clone(),
        v.efficiency.to_string(),
        v.wn8.to_string(),
    ]
}
