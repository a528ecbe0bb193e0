//! # Game Finder Filter Engine
//!
//! Narrows a `GameTable` down to the games matching a `FilterCriteria`.
//! Every constraint in the criteria is applied independently and the results
//! are combined with logical AND. Row order is preserved and the input table
//! is never modified; an empty result is a normal outcome, not an error.

use crate::error::AnalyzerError;
use crate::predicate::Predicate;
use core_types::{FilterCriteria, GameTable};

pub mod error;
pub mod predicate;

/// A compiled set of filter predicates.
#[derive(Debug, Clone)]
pub struct GameFilter {
    predicates: Vec<Predicate>,
}

impl GameFilter {
    /// Validates `criteria` and compiles it into predicates.
    pub fn new(criteria: &FilterCriteria) -> Result<Self, AnalyzerError> {
        criteria.validate()?;
        Ok(Self {
            predicates: Predicate::from_criteria(criteria),
        })
    }

    /// Returns a new table holding the records that satisfy every predicate.
    ///
    /// Fails without filtering if a predicate reads a column the table does
    /// not carry.
    pub fn apply(&self, table: &GameTable) -> Result<GameTable, AnalyzerError> {
        if !table.has_betting() {
            if let Some(predicate) = self
                .predicates
                .iter()
                .find(|p| p.required_column().is_some())
            {
                let err = AnalyzerError::MissingColumn {
                    filter: predicate.name(),
                    column: predicate.required_column().unwrap_or_default(),
                };
                tracing::warn!(
                    error = %err,
                    "Rejected filter against table without betting columns."
                );
                return Err(err);
            }
        }

        let records: Vec<_> = table
            .iter()
            .filter(|record| self.predicates.iter().all(|p| p.matches(record)))
            .cloned()
            .collect();

        tracing::debug!(
            predicates = ?self.predicates,
            input_rows = table.len(),
            matched_rows = records.len(),
            "Applied game filter."
        );

        Ok(table.derive(records))
    }
}

/// Filters `table` down to the records matching `criteria`.
pub fn filter_games(
    table: &GameTable,
    criteria: &FilterCriteria,
) -> Result<GameTable, AnalyzerError> {
    GameFilter::new(criteria)?.apply(table)
}
