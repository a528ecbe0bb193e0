use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to open dataset '{path}': {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Malformed row at line {line}: {message}")]
    MalformedRow { line: u64, message: String },

    #[error("Failed to export to '{path}': {message}")]
    Export { path: PathBuf, message: String },
}
