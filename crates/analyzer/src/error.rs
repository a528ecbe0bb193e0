use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid filter criteria: {0}")]
    InvalidCriteria(#[from] core_types::CoreError),

    #[error("The '{filter}' filter needs the '{column}' column, which the loaded table does not have")]
    MissingColumn {
        filter: &'static str,
        column: &'static str,
    },
}
