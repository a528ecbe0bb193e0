use crate::report::SummaryReport;
use rust_decimal::Decimal;
use std::fmt;

/// A display-ready metric value. Undefined values render as `n/a`.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Count(usize),
    Number { value: Option<f64>, decimals: usize },
    /// A fraction in `[0, 1]`, shown as a percentage with one decimal.
    Percent(Option<f64>),
    /// Shown with two decimals and a `$` sign.
    Currency(Option<Decimal>),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{}", n),
            MetricValue::Number {
                value: Some(v),
                decimals,
            } => write!(f, "{:.*}", *decimals, v),
            MetricValue::Percent(Some(v)) => write!(f, "{:.1}%", v * 100.0),
            MetricValue::Currency(Some(d)) => {
                let amount = d.round_dp(2);
                if amount.is_sign_negative() && !amount.is_zero() {
                    write!(f, "-${:.2}", amount.abs())
                } else {
                    write!(f, "${:.2}", amount.abs())
                }
            }
            _ => f.write_str("n/a"),
        }
    }
}

/// A named metric, in the order it should be displayed.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub name: &'static str,
    pub value: MetricValue,
}

impl Metric {
    fn new(name: &'static str, value: MetricValue) -> Self {
        Self { name, value }
    }
}

fn number(value: Option<f64>, decimals: usize) -> MetricValue {
    MetricValue::Number { value, decimals }
}

impl SummaryReport {
    /// The report as an ordered list of named values.
    ///
    /// Betting metrics are listed only when the report carries a betting block.
    pub fn metrics(&self) -> Vec<Metric> {
        let mut metrics = vec![
            Metric::new("Total Games", MetricValue::Count(self.total_games)),
            Metric::new("Wins", MetricValue::Count(self.win_count)),
            Metric::new("Losses", MetricValue::Count(self.loss_count)),
            Metric::new("Win Rate", number(self.win_rate, 3)),
            Metric::new("Avg Win %", number(self.avg_win_pct, 3)),
            Metric::new("Avg Win Streak", number(self.avg_win_streak, 2)),
            Metric::new("Avg Loss Streak", number(self.avg_loss_streak, 2)),
            Metric::new("Max Win Streak", number(self.max_win_streak.map(f64::from), 0)),
            Metric::new("Max Loss Streak", number(self.max_loss_streak.map(f64::from), 0)),
            Metric::new("Avg Win Margin", number(self.avg_win_margin, 2)),
            Metric::new("Avg Loss Margin", number(self.avg_loss_margin, 2)),
        ];
        if let Some(betting) = &self.betting {
            metrics.extend([
                Metric::new("Hit Over Rate", MetricValue::Percent(betting.hit_over_rate)),
                Metric::new(
                    "Covered Runline Rate",
                    MetricValue::Percent(betting.covered_runline_rate),
                ),
                Metric::new(
                    "Favorite Win Rate",
                    MetricValue::Percent(betting.favorite_win_rate),
                ),
                Metric::new(
                    "Avg ROI on $100 Bet",
                    MetricValue::Currency(betting.avg_roi_on_100_bet),
                ),
            ]);
        }
        metrics
    }
}
