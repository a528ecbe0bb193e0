use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("A histogram needs at least one bin, got {0}")]
    InvalidBinCount(usize),
}
