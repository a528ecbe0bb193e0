use crate::error::AnalyticsError;
use core_types::{GameTable, StreakKind};
use std::collections::BTreeMap;
use std::ops::Range;

/// An equal-width histogram over the observed range of a set of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    /// Inclusive start, exclusive end; the last bin also includes its end.
    pub range: Range<f64>,
    pub count: usize,
}

impl Histogram {
    /// Splits `[min, max]` of the finite input values into `num_bins`
    /// equal-width bins and counts the values in each.
    ///
    /// No values gives no bins. If every value is the same there is a single
    /// bin holding all of them.
    pub fn new<I>(values: I, num_bins: usize) -> Result<Self, AnalyticsError>
    where
        I: IntoIterator<Item = f64>,
    {
        if num_bins == 0 {
            return Err(AnalyticsError::InvalidBinCount(num_bins));
        }

        let values: Vec<f64> = values.into_iter().filter(|v| v.is_finite()).collect();
        let Some(min) = values.iter().copied().reduce(f64::min) else {
            return Ok(Self { bins: vec![] });
        };
        let max = values.iter().copied().fold(min, f64::max);

        if max - min < f64::EPSILON {
            return Ok(Self {
                bins: vec![HistogramBin {
                    range: min..max,
                    count: values.len(),
                }],
            });
        }

        let width = (max - min) / num_bins as f64;
        let mut bins: Vec<HistogramBin> = (0..num_bins)
            .map(|i| HistogramBin {
                range: (min + i as f64 * width)..(min + (i + 1) as f64 * width),
                count: 0,
            })
            .collect();
        if let Some(last) = bins.last_mut() {
            last.range.end = max;
        }

        for value in values {
            let idx = (((value - min) / width).floor() as usize).min(num_bins - 1);
            bins[idx].count += 1;
        }

        Ok(Self { bins })
    }

    /// Histogram of `team_win_pct` across the table.
    pub fn win_pct(table: &GameTable, num_bins: usize) -> Result<Self, AnalyticsError> {
        Self::new(table.iter().map(|r| r.team_win_pct), num_bins)
    }
}

/// How many games carry each streak length, ordered by streak length.
pub fn streak_frequencies(table: &GameTable, kind: StreakKind) -> Vec<(u32, usize)> {
    let mut counts = BTreeMap::new();
    for record in table {
        *counts.entry(record.streak(kind)).or_insert(0) += 1;
    }
    counts.into_iter().collect()
}
