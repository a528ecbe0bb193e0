use core_types::{FavoriteStatus, FilterCriteria, GameRecord, HomeAway};

/// A single constraint on a game record.
///
/// A `FilterCriteria` compiles into a list of these; a record passes the
/// filter when every predicate in the list matches.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Uppercase team code.
    Team(String),
    HomeAway(HomeAway),
    Season(i32),
    /// Inclusive on both ends.
    WinPctRange { min: f64, max: f64 },
    MinWinStreak(u32),
    MinLossStreak(u32),
    Favorite(FavoriteStatus),
}

impl Predicate {
    /// Compiles the constraints present in `criteria`, in a fixed order.
    pub fn from_criteria(criteria: &FilterCriteria) -> Vec<Predicate> {
        let mut predicates = Vec::new();
        if let Some(team) = criteria.normalized_team() {
            predicates.push(Predicate::Team(team));
        }
        if let Some(side) = criteria.home_away {
            predicates.push(Predicate::HomeAway(side));
        }
        if let Some(season) = criteria.season {
            predicates.push(Predicate::Season(season));
        }
        predicates.push(Predicate::WinPctRange {
            min: criteria.min_win_pct,
            max: criteria.max_win_pct,
        });
        if let Some(streak) = criteria.min_win_streak {
            predicates.push(Predicate::MinWinStreak(streak));
        }
        if let Some(streak) = criteria.min_loss_streak {
            predicates.push(Predicate::MinLossStreak(streak));
        }
        if let Some(status) = criteria.favorite_status {
            predicates.push(Predicate::Favorite(status));
        }
        predicates
    }

    pub fn matches(&self, record: &GameRecord) -> bool {
        match self {
            Predicate::Team(team) => record.team.eq_ignore_ascii_case(team),
            Predicate::HomeAway(side) => record.home_away == *side,
            Predicate::Season(season) => record.season == Some(*season),
            Predicate::WinPctRange { min, max } => {
                *min <= record.team_win_pct && record.team_win_pct <= *max
            }
            Predicate::MinWinStreak(min) => record.team_win_streak >= *min,
            Predicate::MinLossStreak(min) => record.team_loss_streak >= *min,
            // Records without a favorite flag never match either side.
            Predicate::Favorite(status) => record.was_favorite() == Some(status.expected_flag()),
        }
    }

    /// The optional column this predicate reads, if any.
    pub fn required_column(&self) -> Option<&'static str> {
        match self {
            Predicate::Favorite(_) => Some("was_favorite"),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Predicate::Team(_) => "team",
            Predicate::HomeAway(_) => "home_away",
            Predicate::Season(_) => "season",
            Predicate::WinPctRange { .. } => "win_pct_range",
            Predicate::MinWinStreak(_) => "min_win_streak",
            Predicate::MinLossStreak(_) => "min_loss_streak",
            Predicate::Favorite(_) => "favorite_status",
        }
    }
}
