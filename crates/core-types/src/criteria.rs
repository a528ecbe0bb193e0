use crate::enums::{FavoriteStatus, HomeAway};
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// The user's query: every field that is `None` (or left at the full
/// win-percentage range) places no constraint on the result.
///
/// Streak minimums are explicit options. `None` means unconstrained, while
/// `Some(0)` is a real constraint that every record satisfies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub team: Option<String>,
    pub home_away: Option<HomeAway>,
    pub season: Option<i32>,
    pub min_win_pct: f64,
    pub max_win_pct: f64,
    pub min_win_streak: Option<u32>,
    pub min_loss_streak: Option<u32>,
    pub favorite_status: Option<FavoriteStatus>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            team: None,
            home_away: None,
            season: None,
            min_win_pct: 0.0,
            max_win_pct: 1.0,
            min_win_streak: None,
            min_loss_streak: None,
            favorite_status: None,
        }
    }
}

impl FilterCriteria {
    /// The team code to match, uppercased, or `None` when unset or blank.
    pub fn normalized_team(&self) -> Option<String> {
        self.team
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_ascii_uppercase)
    }

    /// Checks that both win-percentage bounds are finite numbers in `[0, 1]`.
    ///
    /// An inverted range is allowed; it simply matches nothing.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in [
            ("min_win_pct", self.min_win_pct),
            ("max_win_pct", self.max_win_pct),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(CoreError::InvalidInput(
                    name.to_string(),
                    format!("{} is outside [0, 1]", value),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unconstrained() {
        let criteria = FilterCriteria::default();
        assert_eq!((criteria.min_win_pct, criteria.max_win_pct), (0.0, 1.0));
        assert!(criteria.normalized_team().is_none());
        assert!(criteria.min_win_streak.is_none());
        assert!(criteria.validate().is_ok());
    }

    #[test]
    fn blank_team_counts_as_unset() {
        let criteria = FilterCriteria {
            team: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(criteria.normalized_team().is_none());

        let criteria = FilterCriteria {
            team: Some(" lad".to_string()),
            ..Default::default()
        };
        assert_eq!(criteria.normalized_team().as_deref(), Some("LAD"));
    }

    #[test]
    fn out_of_range_bounds_are_rejected() {
        let criteria = FilterCriteria {
            max_win_pct: 1.5,
            ..Default::default()
        };
        assert!(criteria.validate().is_err());

        let criteria = FilterCriteria {
            min_win_pct: f64::NAN,
            ..Default::default()
        };
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn partial_documents_fill_in_defaults() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"team":"nyy","min_win_streak":0}"#).unwrap();
        assert_eq!(criteria.team.as_deref(), Some("nyy"));
        assert_eq!(criteria.min_win_streak, Some(0));
        assert_eq!(criteria.max_win_pct, 1.0);
    }
}
