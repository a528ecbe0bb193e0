//! Terminal rendering of query results, summaries and dataset overviews.

use analytics::SummaryReport;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{CellAlignment, ContentArrangement, Table};
use core_types::{FilterCriteria, GameRecord, GameTable};
use std::io::{self, Write};

pub const NO_RESULTS: &str = "No results found. Try adjusting your filters.";

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn flag(value: Option<bool>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// The first `limit` games of `games` as a table, betting columns included
/// when the table carries them.
pub fn games_table(games: &GameTable, limit: usize) -> Table {
    let mut header = vec![
        "date", "team", "opp", "venue", "season", "result", "score", "win %", "W streak",
        "L streak",
    ];
    if games.has_betting() {
        header.extend(["favorite", "moneyline", "runline", "over", "roi/100"]);
    }

    let mut table = new_table();
    table.set_header(header);
    for record in games.iter().take(limit) {
        table.add_row(game_row(record, games.has_betting()));
    }
    for idx in [6, 7, 8, 9] {
        if let Some(column) = table.column_mut(idx) {
            column.set_cell_alignment(CellAlignment::Right);
        }
    }
    table
}

fn game_row(record: &GameRecord, has_betting: bool) -> Vec<String> {
    let mut row = vec![
        record.date.format("%Y-%m-%d").to_string(),
        record.team.clone(),
        record.opponent.clone(),
        record.home_away.to_string(),
        record.season.map(|s| s.to_string()).unwrap_or_default(),
        record.result.to_string(),
        format!("{}-{}", record.team_score, record.opp_score),
        format!("{:.3}", record.team_win_pct),
        record.team_win_streak.to_string(),
        record.team_loss_streak.to_string(),
    ];
    if has_betting {
        let line = record.betting.clone().unwrap_or_default();
        row.extend([
            flag(line.was_favorite),
            number(line.closing_moneyline),
            flag(line.covered_runline),
            flag(line.hit_over),
            line.roi_per_100_bet
                .map(|v| format!("{:.2}", v))
                .unwrap_or_default(),
        ]);
    }
    row
}

/// Two-column table of every metric in the report.
pub fn summary_table(report: &SummaryReport) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    for metric in report.metrics() {
        table.add_row(vec![metric.name.to_string(), metric.value.to_string()]);
    }
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    table
}

/// Writes the outcome of a query: preview, row count and summary, or the
/// no-results notice followed by the empty summary.
pub fn write_results<W: Write>(
    out: &mut W,
    filtered: &GameTable,
    summary: &SummaryReport,
    preview_rows: usize,
) -> io::Result<()> {
    if filtered.is_empty() {
        writeln!(out, "{}", NO_RESULTS)?;
    } else {
        writeln!(out, "Filtered Games")?;
        writeln!(out, "{} result(s)", filtered.len())?;
        if filtered.len() > preview_rows {
            writeln!(out, "(showing the first {})", preview_rows)?;
        }
        writeln!(out, "{}", games_table(filtered, preview_rows))?;
    }
    writeln!(out)?;
    writeln!(out, "Summary")?;
    writeln!(out, "{}", summary_table(summary))?;
    Ok(())
}

/// A one-line description of the constraints in `criteria`.
pub fn describe_criteria(criteria: &FilterCriteria) -> String {
    let streak = |min: Option<u32>| min.map_or_else(|| "off".to_string(), |n| format!(">= {}", n));
    format!(
        "team: {} | venue: {} | season: {} | win %: {:.2}-{:.2} | win streak: {} | loss streak: {} | line: {}",
        criteria.normalized_team().unwrap_or_else(|| "any".to_string()),
        criteria.home_away.map_or_else(|| "any".to_string(), |s| s.to_string()),
        criteria.season.map_or_else(|| "all".to_string(), |s| s.to_string()),
        criteria.min_win_pct,
        criteria.max_win_pct,
        streak(criteria.min_win_streak),
        streak(criteria.min_loss_streak),
        criteria.favorite_status.map_or_else(|| "any".to_string(), |s| s.to_string()),
    )
}

/// Overview of the loaded table: size, span, seasons, teams and columns.
pub fn info_table(games: &GameTable) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Property", "Value"]);

    let span = games
        .date_range()
        .map(|(first, last)| format!("{} to {}", first.format("%Y-%m-%d"), last.format("%Y-%m-%d")))
        .unwrap_or_else(|| "n/a".to_string());
    let seasons = games
        .seasons()
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let teams = games.teams();

    table.add_row(vec!["Games".to_string(), games.len().to_string()]);
    table.add_row(vec!["Dates".to_string(), span]);
    table.add_row(vec!["Seasons".to_string(), seasons]);
    table.add_row(vec![format!("Teams ({})", teams.len()), teams.join(", ")]);
    table.add_row(vec![
        "Betting columns".to_string(),
        if games.has_betting() { "yes" } else { "no" }.to_string(),
    ]);
    table
}
