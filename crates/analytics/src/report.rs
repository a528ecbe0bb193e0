use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Aggregate statistics over a set of games.
///
/// Every metric that can be undefined (no rows, no wins, no losses) is an
/// `Option`. Counts are always defined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    // I. Outcomes
    pub total_games: usize,
    pub win_count: usize,
    pub loss_count: usize,
    /// `win_count / total_games`, 3 decimals.
    pub win_rate: Option<f64>,

    // II. Form
    /// Mean `team_win_pct`, 3 decimals.
    pub avg_win_pct: Option<f64>,
    /// 2 decimals.
    pub avg_win_streak: Option<f64>,
    /// 2 decimals.
    pub avg_loss_streak: Option<f64>,
    pub max_win_streak: Option<u32>,
    pub max_loss_streak: Option<u32>,

    // III. Margins
    /// Mean runs won by, over wins only.
    pub avg_win_margin: Option<f64>,
    /// Mean runs lost by (positive), over losses only.
    pub avg_loss_margin: Option<f64>,

    // IV. Market
    /// Present exactly when the table carries the betting columns.
    pub betting: Option<BettingSummary>,
}

/// Rates derived from the optional betting columns.
///
/// Rates are fractions in `[0, 1]`, 3 decimals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BettingSummary {
    pub hit_over_rate: Option<f64>,
    pub covered_runline_rate: Option<f64>,
    /// Win rate among games where the team was the favorite.
    pub favorite_win_rate: Option<f64>,
    /// Mean profit or loss of a 100-unit bet, 2 decimals.
    pub avg_roi_on_100_bet: Option<Decimal>,
}

impl SummaryReport {
    /// The report for a table with no rows.
    pub fn empty(has_betting: bool) -> Self {
        Self {
            betting: has_betting.then(BettingSummary::default),
            ..Self::default()
        }
    }
}
