use crate::enums::{GameResult, HomeAway, StreakKind};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One row of the game table: a single game seen from `team`'s side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub date: NaiveDate,
    /// Team code, stored uppercase.
    pub team: String,
    pub opponent: String,
    pub home_away: HomeAway,
    pub season: Option<i32>,
    pub result: GameResult,
    pub team_score: u32,
    pub opp_score: u32,
    /// The team's win percentage as of this game, in `[0.0, 1.0]`.
    pub team_win_pct: f64,
    pub team_win_streak: u32,
    pub team_loss_streak: u32,
    /// Market data for the game. `Some` exactly when the source table carries
    /// the betting columns.
    pub betting: Option<BettingLine>,
}

/// Closing betting-market fields for a single game.
///
/// Each field is optional on its own: a table can carry the betting columns
/// while leaving individual cells blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BettingLine {
    pub was_favorite: Option<bool>,
    pub closing_moneyline: Option<f64>,
    pub covered_runline: Option<bool>,
    pub hit_over: Option<bool>,
    pub roi_per_100_bet: Option<f64>,
}

impl GameRecord {
    pub fn is_win(&self) -> bool {
        self.result.is_win()
    }

    pub fn streak(&self, kind: StreakKind) -> u32 {
        match kind {
            StreakKind::Win => self.team_win_streak,
            StreakKind::Loss => self.team_loss_streak,
        }
    }

    /// Runs scored minus runs allowed. Negative for losses.
    pub fn run_differential(&self) -> i64 {
        i64::from(self.team_score) - i64::from(self.opp_score)
    }

    pub fn was_favorite(&self) -> Option<bool> {
        self.betting.as_ref().and_then(|b| b.was_favorite)
    }
}
