//! Tank reference reports built from the wotclans tanks API.

use super::{display, Report, Table};
use crate::commands::definitions::TankView;
use crate::error::ReportError;
use crate::provider::TankStats;

const AMBIGUOUS: &str = "Multiple tanks were returned for that name. This means there is not an \
exact match. You can retry with one of the following (assuming it contains what you want):";

const EXPECTED_VALUES_NOTE: &str = "*Note: These are the Expected Values, which reflect the \
65^th percentile of players! (Matching these gives a WN8 of 1565)*";

/// Renders a tank search result.
///
/// No match is [`ReportError::NotFound`]; several matches produce a list of
/// candidate names instead of statistics.
pub fn render(view: TankView, tanks: &[TankStats], source: &str) -> Result<Report, ReportError> {
    let tank = match tanks {
        [] => return Err(ReportError::NotFound),
        [tank] => tank,
        candidates => return Ok(disambiguation(candidates)),
    };

    let report = Report::titled(&tank.name).section(format!(
        "{} tier {} tank ({})",
        display(&tank.type_name, "TypeName")?,
        display(&tank.tier, "Tier")?,
        display(&tank.natio_name, "NatioName")?,
    ));

    let report = match view {
        TankView::Moe => {
            let mut marks = Table::new(["Mark", "Average Damage"]).centered();
            marks.push_row(["1".to_string(), display(&tank.moe1_dmg, "Moe1Dmg")?]);
            marks.push_row(["2".to_string(), display(&tank.moe2_dmg, "Moe2Dmg")?]);
            marks.push_row(["3".to_string(), display(&tank.moe3_dmg, "Moe3Dmg")?]);
            report.table(&marks)
        }
        TankView::Wn8 => {
            let expected = Table::key_value([
                ("Damage", display(&tank.damage, "Damage")?),
                ("Win rate", display(&tank.win_rate, "WinRate")?),
                ("Kill ratio", display(&tank.frag, "Frag")?),
                ("Spot ratio", display(&tank.spot, "Spot")?),
                ("Defense ratio", display(&tank.def, "Def")?),
            ]);
            report.section(EXPECTED_VALUES_NOTE).table(&expected)
        }
    };

    Ok(report.source(source))
}

fn disambiguation(candidates: &[TankStats]) -> Report {
    let mut names = Table::new(["Tank"]).centered();
    for tank in candidates {
        names.push_row([&tank.name]);
    }
    Report::untitled().section(AMBIGUOUS).table(&names)
}
