use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether the team played at its own ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum HomeAway {
    #[serde(alias = "Home", alias = "HOME")]
    Home,
    #[serde(alias = "Away", alias = "AWAY")]
    Away,
}

impl HomeAway {
    pub fn as_str(&self) -> &'static str {
        match self {
            HomeAway::Home => "home",
            HomeAway::Away => "away",
        }
    }
}

impl fmt::Display for HomeAway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HomeAway {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "home" => Ok(HomeAway::Home),
            "away" => Ok(HomeAway::Away),
            other => Err(CoreError::InvalidInput(
                "home_away".to_string(),
                format!("expected 'home' or 'away', got '{}'", other),
            )),
        }
    }
}

/// Outcome of a game from the point of view of `team`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(alias = "w")]
    W,
    #[serde(alias = "l")]
    L,
}

impl GameResult {
    pub fn is_win(&self) -> bool {
        matches!(self, GameResult::W)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameResult::W => "W",
            GameResult::L => "L",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Betting-market side of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum FavoriteStatus {
    Favorite,
    Underdog,
}

impl FavoriteStatus {
    /// Returns the `was_favorite` value a record must carry to match this status.
    pub fn expected_flag(&self) -> bool {
        matches!(self, FavoriteStatus::Favorite)
    }
}

impl fmt::Display for FavoriteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FavoriteStatus::Favorite => f.write_str("favorite"),
            FavoriteStatus::Underdog => f.write_str("underdog"),
        }
    }
}

impl FromStr for FavoriteStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "favorite" | "fav" => Ok(FavoriteStatus::Favorite),
            "underdog" | "dog" => Ok(FavoriteStatus::Underdog),
            other => Err(CoreError::InvalidInput(
                "favorite_status".to_string(),
                format!("expected 'favorite' or 'underdog', got '{}'", other),
            )),
        }
    }
}

/// Selects one of the two streak counters on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakKind {
    Win,
    Loss,
}
