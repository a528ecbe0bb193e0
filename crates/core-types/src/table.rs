use crate::record::GameRecord;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// An ordered, read-only collection of game records.
///
/// `has_betting` records whether the source carried the optional betting
/// columns. It is decided once when the table is loaded and carried over to
/// every table derived from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameTable {
    records: Vec<GameRecord>,
    has_betting: bool,
}

impl GameTable {
    pub fn new(records: Vec<GameRecord>, has_betting: bool) -> Self {
        Self {
            records,
            has_betting,
        }
    }

    /// Builds a table with the same column set as `self` from derived records.
    pub fn derive(&self, records: Vec<GameRecord>) -> Self {
        Self::new(records, self.has_betting)
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GameRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_betting(&self) -> bool {
        self.has_betting
    }

    /// Distinct seasons present in the table, ascending.
    pub fn seasons(&self) -> Vec<i32> {
        self.records
            .iter()
            .filter_map(|r| r.season)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct team codes present in the table, ascending.
    pub fn teams(&self) -> Vec<&str> {
        self.records
            .iter()
            .map(|r| r.team.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Earliest and latest game dates, or `None` for an empty table.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.records.iter().map(|r| r.date).min()?;
        let last = self.records.iter().map(|r| r.date).max()?;
        Some((first, last))
    }
}

impl<'a> IntoIterator for &'a GameTable {
    type Item = &'a GameRecord;
    type IntoIter = std::slice::Iter<'a, GameRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
