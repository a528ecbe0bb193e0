use crate::report::{BettingSummary, SummaryReport};
use core_types::{BettingLine, GameRecord, GameTable};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// A stateless calculator for deriving summary statistics from a game table.
#[derive(Debug, Default)]
pub struct SummaryEngine {}

impl SummaryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes every summary metric over `table` in a single report.
    pub fn calculate(&self, table: &GameTable) -> SummaryReport {
        if table.is_empty() {
            return SummaryReport::empty(table.has_betting());
        }

        let mut report = SummaryReport::default();
        self.calculate_outcomes(table, &mut report);
        self.calculate_form(table, &mut report);
        self.calculate_margins(table, &mut report);
        if table.has_betting() {
            report.betting = Some(self.calculate_betting(table));
        }

        tracing::debug!(
            total_games = report.total_games,
            win_count = report.win_count,
            "Calculated summary."
        );
        report
    }

    fn calculate_outcomes(&self, table: &GameTable, report: &mut SummaryReport) {
        report.total_games = table.len();
        report.win_count = table.iter().filter(|r| r.is_win()).count();
        report.loss_count = report.total_games - report.win_count;
        report.win_rate = ratio(report.win_count, report.total_games).map(|r| round_dp(r, 3));
    }

    fn calculate_form(&self, table: &GameTable, report: &mut SummaryReport) {
        report.avg_win_pct = mean(table.iter().map(|r| r.team_win_pct)).map(|m| round_dp(m, 3));
        report.avg_win_streak =
            mean(table.iter().map(|r| f64::from(r.team_win_streak))).map(|m| round_dp(m, 2));
        report.avg_loss_streak =
            mean(table.iter().map(|r| f64::from(r.team_loss_streak))).map(|m| round_dp(m, 2));
        report.max_win_streak = table.iter().map(|r| r.team_win_streak).max();
        report.max_loss_streak = table.iter().map(|r| r.team_loss_streak).max();
    }

    fn calculate_margins(&self, table: &GameTable, report: &mut SummaryReport) {
        report.avg_win_margin = mean(
            table
                .iter()
                .filter(|r| r.is_win())
                .map(|r| r.run_differential() as f64),
        )
        .map(|m| round_dp(m, 2));

        // Sign flipped so a typical loss reads as a positive margin.
        report.avg_loss_margin = mean(
            table
                .iter()
                .filter(|r| !r.is_win())
                .map(|r| -r.run_differential() as f64),
        )
        .map(|m| round_dp(m, 2));
    }

    fn calculate_betting(&self, table: &GameTable) -> BettingSummary {
        let lines = || table.iter().filter_map(|r| r.betting.as_ref());

        let favorites: Vec<&GameRecord> = table
            .iter()
            .filter(|r| r.was_favorite() == Some(true))
            .collect();
        let favorite_wins = favorites.iter().filter(|r| r.is_win()).count();

        let avg_roi = mean(lines().filter_map(|l| l.roi_per_100_bet))
            .and_then(Decimal::from_f64)
            .map(|d| d.round_dp(2));

        BettingSummary {
            hit_over_rate: flag_rate(lines(), |l| l.hit_over),
            covered_runline_rate: flag_rate(lines(), |l| l.covered_runline),
            favorite_win_rate: ratio(favorite_wins, favorites.len()).map(|r| round_dp(r, 3)),
            avg_roi_on_100_bet: avg_roi,
        }
    }
}

/// Computes the summary statistics of `table`.
pub fn calculate_summary(table: &GameTable) -> SummaryReport {
    SummaryEngine::new().calculate(table)
}

/// Fraction of `true` among the lines where `flag` is set; `None` when no line sets it.
fn flag_rate<'a, I, F>(lines: I, flag: F) -> Option<f64>
where
    I: Iterator<Item = &'a BettingLine>,
    F: Fn(&BettingLine) -> Option<bool>,
{
    let (hits, seen) = lines
        .filter_map(|l| flag(l))
        .fold((0usize, 0usize), |(hits, seen), value| {
            (hits + usize::from(value), seen + 1)
        });
    ratio(hits, seen).map(|r| round_dp(r, 3))
}

fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    (denominator > 0).then(|| numerator as f64 / denominator as f64)
}

fn mean<I: IntoIterator<Item = f64>>(values: I) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn round_dp(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use core_types::{GameResult, HomeAway};
    use rust_decimal_macros::dec;

    fn game(
        result: GameResult,
        scores: (u32, u32),
        win_pct: f64,
        streaks: (u32, u32),
    ) -> GameRecord {
        GameRecord {
            date: NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            team: "LAD".to_string(),
            opponent: "SDP".to_string(),
            home_away: HomeAway::Home,
            season: Some(2023),
            result,
            team_score: scores.0,
            opp_score: scores.1,
            team_win_pct: win_pct,
            team_win_streak: streaks.0,
            team_loss_streak: streaks.1,
            betting: None,
        }
    }

    fn with_line(mut record: GameRecord, line: BettingLine) -> GameRecord {
        record.betting = Some(line);
        record
    }

    #[test]
    fn empty_table_yields_the_empty_shape() {
        let report = calculate_summary(&GameTable::default());
        assert_eq!(report.total_games, 0);
        assert_eq!(report.win_count, 0);
        assert_eq!(report.loss_count, 0);
        assert_eq!(report.win_rate, None);
        assert_eq!(report.avg_win_pct, None);
        assert_eq!(report.max_win_streak, None);
        assert_eq!(report.avg_loss_margin, None);
        assert!(report.betting.is_none());
    }

    #[test]
    fn empty_table_with_betting_columns_keeps_an_undefined_betting_block() {
        let report = calculate_summary(&GameTable::new(vec![], true));
        assert_eq!(report.betting, Some(BettingSummary::default()));
    }

    #[test]
    fn all_wins_scenario() {
        let table = GameTable::new(
            vec![
                game(GameResult::W, (5, 3), 0.60, (1, 0)),
                game(GameResult::W, (7, 2), 0.62, (2, 0)),
                game(GameResult::W, (4, 3), 0.65, (1, 0)),
            ],
            false,
        );
        let report = calculate_summary(&table);
        assert_eq!(report.total_games, 3);
        assert_eq!(report.win_count, 3);
        assert_eq!(report.loss_count, 0);
        assert_eq!(report.win_rate, Some(1.0));
        assert_eq!(report.avg_win_pct, Some(0.623));
        assert_eq!(report.avg_win_streak, Some(1.33));
        assert_eq!(report.max_win_streak, Some(2));
        assert_eq!(report.avg_win_margin, Some(2.67));
        assert_eq!(report.avg_loss_margin, None);
    }

    #[test]
    fn loss_margin_is_positive() {
        let table = GameTable::new(
            vec![
                game(GameResult::L, (2, 6), 0.45, (0, 1)),
                game(GameResult::L, (1, 3), 0.44, (0, 2)),
                game(GameResult::W, (9, 1), 0.46, (1, 0)),
            ],
            false,
        );
        let report = calculate_summary(&table);
        assert_eq!(report.win_rate, Some(0.333));
        assert_eq!(report.avg_loss_margin, Some(3.0));
        assert_eq!(report.avg_win_margin, Some(8.0));
        assert_eq!(report.avg_loss_streak, Some(1.0));
        assert_eq!(report.max_loss_streak, Some(2));
    }

    #[test]
    fn betting_rates_use_rows_where_the_value_is_present() {
        let table = GameTable::new(
            vec![
                with_line(
                    game(GameResult::W, (5, 3), 0.6, (1, 0)),
                    BettingLine {
                        was_favorite: Some(true),
                        covered_runline: Some(true),
                        hit_over: Some(true),
                        roi_per_100_bet: Some(66.5),
                        ..Default::default()
                    },
                ),
                with_line(
                    game(GameResult::L, (2, 4), 0.59, (0, 1)),
                    BettingLine {
                        was_favorite: Some(true),
                        covered_runline: Some(false),
                        hit_over: Some(false),
                        roi_per_100_bet: Some(-100.0),
                        ..Default::default()
                    },
                ),
                with_line(
                    game(GameResult::W, (3, 1), 0.6, (1, 0)),
                    BettingLine {
                        was_favorite: Some(false),
                        covered_runline: Some(true),
                        ..Default::default()
                    },
                ),
                with_line(game(GameResult::L, (0, 1), 0.59, (0, 1)), BettingLine::default()),
            ],
            true,
        );
        let betting = calculate_summary(&table).betting.unwrap();
        assert_eq!(betting.hit_over_rate, Some(0.5));
        assert_eq!(betting.covered_runline_rate, Some(0.667));
        assert_eq!(betting.favorite_win_rate, Some(0.5));
        assert_eq!(betting.avg_roi_on_100_bet, Some(dec!(-16.75)));
    }

    #[test]
    fn favorite_win_rate_is_undefined_without_favorites() {
        let table = GameTable::new(
            vec![with_line(
                game(GameResult::W, (5, 3), 0.6, (1, 0)),
                BettingLine {
                    was_favorite: Some(false),
                    ..Default::default()
                },
            )],
            true,
        );
        let betting = calculate_summary(&table).betting.unwrap();
        assert_eq!(betting.favorite_win_rate, None);
        assert_eq!(betting.hit_over_rate, None);
        assert_eq!(betting.avg_roi_on_100_bet, None);
    }

    #[test]
    fn rates_stay_within_unit_interval() {
        let results = [GameResult::W, GameResult::L, GameResult::W, GameResult::W, GameResult::L];
        for n in 1..=results.len() {
            let records = results[..n]
                .iter()
                .enumerate()
                .map(|(i, &result)| {
                    with_line(
                        game(result, (3, 2), 0.5, (0, 0)),
                        BettingLine {
                            was_favorite: Some(i % 2 == 0),
                            covered_runline: Some(i % 3 == 0),
                            hit_over: Some(i % 2 == 1),
                            ..Default::default()
                        },
                    )
                })
                .collect();
            let report = calculate_summary(&GameTable::new(records, true));
            let betting = report.betting.clone().unwrap();
            for rate in [
                report.win_rate,
                betting.hit_over_rate,
                betting.covered_runline_rate,
                betting.favorite_win_rate,
            ]
            .into_iter()
            .flatten()
            {
                assert!((0.0..=1.0).contains(&rate), "rate {rate} out of bounds");
            }
        }
    }

    #[test]
    fn rounding_helper() {
        assert_eq!(round_dp(0.623_333, 3), 0.623);
        assert_eq!(round_dp(1.335, 0), 1.0);
        assert_eq!(round_dp(2.666_666, 2), 2.67);
    }
}
