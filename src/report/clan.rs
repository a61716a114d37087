//! Clan reports built from the wotclans clan API.

use super::{display, percent, required, Report, Table};
use crate::commands::definitions::ClanView;
use crate::error::ReportError;
use crate::provider::{ClanMember, ClanStats};
use crate::record::Scalar;

/// Members listed in each half of the `top` report.
pub const TOP_MEMBERS: usize = 7;

/// Renders one clan view.
pub fn render(view: ClanView, clan: &ClanStats, source: &str) -> Result<Report, ReportError> {
    if clan.name.is_empty() {
        return Err(ReportError::Schema("Name"));
    }

    let report = Report::titled(&clan.name);
    let report = match view {
        ClanView::Summary => report.table(&summary_table(clan)?),
        ClanView::Active => active(report, clan)?,
        ClanView::Battles => report.table(&battles_table(clan)?),
        ClanView::Players => players(report, clan)?,
        ClanView::Tier => tiers(report, clan)?,
        ClanView::Top => top(report, clan),
    };

    Ok(report.source(source))
}

fn summary_table(clan: &ClanStats) -> Result<Table, ReportError> {
    Ok(Table::key_value([
        ("This month's battles", display(&clan.month_battles, "MonthBattles")?),
        ("Total members", display(&clan.count, "Count")?),
        ("Active members", display(&clan.active, "Active")?),
        ("Percent of players active", percent(&clan.active_percent, "ActivePercent")?),
        ("Total WN8", display(&clan.total_wn8, "TotalWn8")?),
        ("Total win rate", percent(&clan.total_win_rate, "TotalWinRate")?),
    ]))
}

fn active(report: Report, clan: &ClanStats) -> Result<Report, ReportError> {
    let overview = Table::key_value([
        ("Active member count", display(&clan.active, "Active")?),
        ("Percent of players active", percent(&clan.active_percent, "ActivePercent")?),
        ("This month's battles", display(&clan.month_battles, "MonthBattles")?),
        ("Win rate", percent(&clan.active_win_rate, "ActiveWinRate")?),
        ("WN8", display(&clan.active_wn8, "ActiveWn8")?),
        ("Average tier", display(&clan.active_avg_tier, "ActiveAvgTier")?),
    ]);

    // A member is active if they played this month.
    let members = member_table(
        ["Player", "Month's battles"],
        clan.players.iter().filter(|m| !m.month_battles.is_blank()),
        |m| vec![m.month_battles.to_string()],
    );

    Ok(report
        .table(&overview)
        .section("###Active players")
        .table(&members))
}

fn battles_table(clan: &ClanStats) -> Result<Table, ReportError> {
    Ok(Table::key_value([
        ("Total battles", display(&clan.total_battles, "TotalBattles")?),
        ("Total win rate", percent(&clan.total_win_rate, "TotalWinRate")?),
        ("This month's battles", display(&clan.month_battles, "MonthBattles")?),
        ("This month's win rate", month_win_rate(&clan.month_win_rate)?),
        ("Active player battles", display(&clan.active_battles, "ActiveBattles")?),
        ("Top 15 player battles", display(&clan.top15_battles, "Top15Battles")?),
    ]))
}

/// Month win rate arrives either as a fraction or already formatted.
fn month_win_rate(rate: &Scalar) -> Result<String, ReportError> {
    match required(rate, "MonthWinRate")? {
        Scalar::Text(text) => Ok(text.clone()),
        other => percent(other, "MonthWinRate"),
    }
}

fn players(report: Report, clan: &ClanStats) -> Result<Report, ReportError> {
    let overview = Table::key_value([
        ("Total members", display(&clan.count, "Count")?),
        ("Active members", display(&clan.active, "Active")?),
    ]);

    let members = member_table(
        ["Player", "Total WN8", "Month's WN8"],
        clan.players.iter(),
        |m| vec![m.total_wn8.to_string(), m.month_wn8.to_string()],
    );

    Ok(report
        .table(&overview)
        .section("###All clan members")
        .table(&members))
}

fn tiers(report: Report, clan: &ClanStats) -> Result<Report, ReportError> {
    let overview = Table::key_value([
        ("Total average tier", display(&clan.total_avg_tier, "TotalAvgTier")?),
        ("Active average tier", display(&clan.active_avg_tier, "ActiveAvgTier")?),
        ("Top 15 average tier", display(&clan.top15_avg_tier, "Top15AvgTier")?),
    ]);

    let members = member_table(
        ["Player", "Lifetime tier average", "Month's tier average"],
        clan.players.iter(),
        |m| vec![m.total_tier.to_string(), m.month_tier.to_string()],
    );

    Ok(report.table(&overview).table(&members))
}

fn top(report: Report, clan: &ClanStats) -> Report {
    let month = member_table(
        ["Player", "Month's WN8"],
        top_members(&clan.players, |m| &m.month_wn8),
        |m| vec![m.month_wn8.to_string()],
    );
    let overall = member_table(
        ["Player", "Lifetime WN8"],
        top_members(&clan.players, |m| &m.total_wn8),
        |m| vec![m.total_wn8.to_string()],
    );

    report
        .section(format!("###Top {TOP_MEMBERS} active players"))
        .table(&month)
        .section(format!("###Top {TOP_MEMBERS} players overall"))
        .table(&overall)
}

/// Highest [`TOP_MEMBERS`] members by `key`, ties in API order.
pub fn top_members<'a, F>(members: &'a [ClanMember], key: F) -> Vec<&'a ClanMember>
where
    F: Fn(&ClanMember) -> &Scalar,
{
    let mut sorted: Vec<&ClanMember> = members.iter().collect();
    sorted.sort_by(|a, b| key(a).cmp_desc(key(b)));
    sorted.truncate(TOP_MEMBERS);
    sorted
}

/// Centered member list: name first, then the cells `extra` picks.
fn member_table<'a, const N: usize, I, F>(headers: [&str; N], members: I, extra: F) -> Table
where
    I: IntoIterator<Item = &'a ClanMember>,
    F: Fn(&ClanMember) -> Vec<String>,
{
    let mut table = Table::new(headers).centered();
    for member in members {
        let mut cells = vec![member.name.clone()];
        cells.extend(extra(member));
        table.push_row(cells);
    }
    table
}
