//! Column layout of the game file and the lenient cell parsers used to read it.

use chrono::NaiveDate;
use core_types::{BettingLine, GameRecord, GameResult, HomeAway};
use serde::{Deserialize, Deserializer, de};

/// Columns every game file must carry.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "date",
    "team",
    "opponent",
    "home_away",
    "result",
    "team_score",
    "opp_score",
    "team_win_pct",
    "team_win_streak",
    "team_loss_streak",
];

pub const SEASON_COLUMN: &str = "season";

/// Optional market columns. Their presence is keyed on `was_favorite`.
pub const BETTING_COLUMNS: [&str; 5] = [
    "was_favorite",
    "closing_moneyline",
    "covered_runline",
    "hit_over",
    "roi_per_100_bet",
];

/// A single CSV row exactly as it appears on disk.
#[derive(Debug, Deserialize)]
pub(crate) struct RawGameRow {
    #[serde(deserialize_with = "de_date")]
    date: NaiveDate,
    team: String,
    opponent: String,
    #[serde(deserialize_with = "de_home_away")]
    home_away: HomeAway,
    #[serde(default, deserialize_with = "de_opt_season")]
    season: Option<i32>,
    #[serde(deserialize_with = "de_result")]
    result: GameResult,
    #[serde(deserialize_with = "de_count")]
    team_score: u32,
    #[serde(deserialize_with = "de_count")]
    opp_score: u32,
    team_win_pct: f64,
    #[serde(deserialize_with = "de_count")]
    team_win_streak: u32,
    #[serde(deserialize_with = "de_count")]
    team_loss_streak: u32,
    #[serde(default, deserialize_with = "de_opt_flag")]
    was_favorite: Option<bool>,
    #[serde(default)]
    closing_moneyline: Option<f64>,
    #[serde(default, deserialize_with = "de_opt_flag")]
    covered_runline: Option<bool>,
    #[serde(default, deserialize_with = "de_opt_flag")]
    hit_over: Option<bool>,
    #[serde(default)]
    roi_per_100_bet: Option<f64>,
}

impl RawGameRow {
    /// Validates the row and converts it into a `GameRecord`.
    pub(crate) fn into_record(self, has_betting: bool) -> Result<GameRecord, String> {
        if !(0.0..=1.0).contains(&self.team_win_pct) {
            return Err(format!(
                "team_win_pct {} is outside [0, 1]",
                self.team_win_pct
            ));
        }
        let team = self.team.trim().to_ascii_uppercase();
        if team.is_empty() {
            return Err("team is empty".to_string());
        }

        let betting = has_betting.then(|| BettingLine {
            was_favorite: self.was_favorite,
            closing_moneyline: self.closing_moneyline,
            covered_runline: self.covered_runline,
            hit_over: self.hit_over,
            roi_per_100_bet: self.roi_per_100_bet,
        });

        Ok(GameRecord {
            date: self.date,
            team,
            opponent: self.opponent.trim().to_ascii_uppercase(),
            home_away: self.home_away,
            season: self.season,
            result: self.result,
            team_score: self.team_score,
            opp_score: self.opp_score,
            team_win_pct: self.team_win_pct,
            team_win_streak: self.team_win_streak,
            team_loss_streak: self.team_loss_streak,
            betting,
        })
    }
}

/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
fn de_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let day = raw.trim().get(..10).unwrap_or(raw.trim());
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| de::Error::custom(format!("invalid date '{}': {}", raw, e)))
}

fn de_home_away<'de, D: Deserializer<'de>>(deserializer: D) -> Result<HomeAway, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(de::Error::custom)
}

fn de_result<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GameResult, D::Error> {
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "W" | "w" => Ok(GameResult::W),
        "L" | "l" => Ok(GameResult::L),
        other => Err(de::Error::custom(format!(
            "invalid result '{}', expected W or L",
            other
        ))),
    }
}

/// Non-negative whole number, tolerating a trailing `.0` left by float-typed exports.
fn parse_count(raw: &str) -> Result<u32, String> {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u32>() {
        return Ok(value);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) => {
            Ok(value as u32)
        }
        _ => Err(format!("invalid count '{}'", raw)),
    }
}

fn de_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_count(&raw).map_err(de::Error::custom)
}

fn de_opt_season<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i32>, D::Error> {
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let season = parse_count(&raw).map_err(de::Error::custom)?;
    i32::try_from(season)
        .map(Some)
        .map_err(|_| de::Error::custom(format!("invalid season '{}'", raw)))
}

fn parse_flag(raw: &str) -> Result<Option<bool>, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "" => Ok(None),
        "true" | "t" | "1" | "1.0" | "yes" | "y" => Ok(Some(true)),
        "false" | "f" | "0" | "0.0" | "no" | "n" => Ok(Some(false)),
        other => Err(format!("invalid boolean '{}'", other)),
    }
}

fn de_opt_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_flag(&raw).map_err(de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accept_float_formatting() {
        assert_eq!(parse_count("3"), Ok(3));
        assert_eq!(parse_count(" 7.0 "), Ok(7));
        assert!(parse_count("2.5").is_err());
        assert!(parse_count("-1").is_err());
        assert!(parse_count("many").is_err());
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert_eq!(parse_flag("True"), Ok(Some(true)));
        assert_eq!(parse_flag("0"), Ok(Some(false)));
        assert_eq!(parse_flag("  "), Ok(None));
        assert!(parse_flag("maybe").is_err());
    }
}
