//! # Game Finder Analytics
//!
//! Aggregate statistics and distributions over a `GameTable`, usually the
//! output of the filter engine.
//!
//! ## Architectural Principles
//!
//! - **Pure logic:** no I/O and no knowledge of where the table came from.
//! - **Stateless calculation:** `SummaryEngine` takes a table and produces a
//!   `SummaryReport`. An empty table yields a well-defined report with zero
//!   counts and every other metric undefined; nothing here divides by zero.
//!
//! ## Public API
//!
//! - `calculate_summary` / `SummaryEngine`: the summary calculator.
//! - `SummaryReport`: the typed result, with `metrics()` for named display values.
//! - `Histogram`, `streak_frequencies`: data behind the distribution charts.

pub mod distribution;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod report;

pub use distribution::{Histogram, HistogramBin, streak_frequencies};
pub use engine::{SummaryEngine, calculate_summary};
pub use error::AnalyticsError;
pub use metrics::{Metric, MetricValue};
pub use report::{BettingSummary, SummaryReport};
