//! Text bar charts for the win-percentage and streak distributions.

use analytics::{AnalyticsError, Histogram, streak_frequencies};
use core_types::{GameTable, StreakKind};
use std::fmt::Write;

const BAR: char = '█';

fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 || count == 0 {
        return String::new();
    }
    // Any non-zero count gets at least one cell.
    let cells = ((count * width) as f64 / max as f64).round().max(1.0) as usize;
    BAR.to_string().repeat(cells)
}

/// Renders `rows` of `(label, count)` as horizontal bars under `title`.
fn bar_chart(title: &str, rows: &[(String, usize)], width: usize) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", title);
    if rows.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return out;
    }

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let max = rows.iter().map(|(_, count)| *count).max().unwrap_or(0);
    for (label, count) in rows {
        let _ = writeln!(
            out,
            "  {:>lw$} | {} {}",
            label,
            bar(*count, max, width),
            count,
            lw = label_width
        );
    }
    out
}

/// Histogram of team win percentage across `games`.
pub fn win_pct_chart(
    games: &GameTable,
    bins: usize,
    width: usize,
) -> Result<String, AnalyticsError> {
    let histogram = Histogram::win_pct(games, bins)?;
    let rows: Vec<(String, usize)> = histogram
        .bins
        .iter()
        .map(|bin| (format!("{:.3}-{:.3}", bin.range.start, bin.range.end), bin.count))
        .collect();
    Ok(bar_chart("Team Win % Distribution", &rows, width))
}

/// Frequency of each streak length of the given kind.
pub fn streak_chart(games: &GameTable, kind: StreakKind, width: usize) -> String {
    let title = match kind {
        StreakKind::Win => "Team Win Streak Distribution",
        StreakKind::Loss => "Team Loss Streak Distribution",
    };
    let rows: Vec<(String, usize)> = streak_frequencies(games, kind)
        .into_iter()
        .map(|(length, count)| (length.to_string(), count))
        .collect();
    bar_chart(title, &rows, width)
}

/// All distribution charts for `games`, separated by blank lines.
pub fn render_charts(
    games: &GameTable,
    bins: usize,
    width: usize,
) -> Result<String, AnalyticsError> {
    Ok([
        win_pct_chart(games, bins, width)?,
        streak_chart(games, StreakKind::Win, width),
        streak_chart(games, StreakKind::Loss, width),
    ]
    .join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{GameRecord, GameResult, HomeAway};

    fn record(win_pct: f64, win_streak: u32, loss_streak: u32) -> GameRecord {
        GameRecord {
            date: NaiveDate::from_ymd_opt(2021, 5, 3).unwrap(),
            team: "SFG".to_string(),
            opponent: "LAD".to_string(),
            home_away: HomeAway::Home,
            season: Some(2021),
            result: if win_streak > 0 { GameResult::W } else { GameResult::L },
            team_score: 2,
            opp_score: 2,
            team_win_pct: win_pct,
            team_win_streak: win_streak,
            team_loss_streak: loss_streak,
            betting: None,
        }
    }

    #[test]
    fn bars_scale_to_the_largest_count() {
        assert_eq!(bar(4, 4, 10).chars().count(), 10);
        assert_eq!(bar(2, 4, 10).chars().count(), 5);
        assert_eq!(bar(1, 100, 10).chars().count(), 1);
        assert!(bar(0, 4, 10).is_empty());
    }

    #[test]
    fn streak_chart_lists_each_length() {
        let games = GameTable::new(
            vec![record(0.5, 1, 0), record(0.5, 1, 0), record(0.5, 4, 0)],
            false,
        );
        let chart = streak_chart(&games, StreakKind::Win, 8);
        let lines: Vec<&str> = chart.lines().collect();
        assert_eq!(lines[0], "Team Win Streak Distribution");
        assert_eq!(lines[1], "  1 | ████████ 2");
        assert_eq!(lines[2], "  4 | ████ 1");
    }

    #[test]
    fn empty_table_renders_placeholders() {
        let charts = render_charts(&GameTable::default(), 20, 40).unwrap();
        assert!(charts.contains("Team Win % Distribution\n  (no data)"));
        assert!(charts.contains("Team Loss Streak Distribution\n  (no data)"));
    }

    #[test]
    fn win_pct_chart_has_one_row_per_bin() {
        let games = GameTable::new(
            (0..10).map(|i| record(0.3 + f64::from(i) * 0.05, 0, 1)).collect(),
            false,
        );
        let chart = win_pct_chart(&games, 5, 20).unwrap();
        assert_eq!(chart.lines().count(), 6);
        assert!(chart.contains("0.300-"));
    }
}
