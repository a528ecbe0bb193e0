use crate::error::DatasetError;
use crate::schema::{RawGameRow, REQUIRED_COLUMNS};
use core_types::GameTable;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Loads the full game table from a CSV file on disk.
pub fn load_games(path: &Path) -> Result<GameTable, DatasetError> {
    let file = File::open(path).map_err(|source| DatasetError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_games(file)?;
    tracing::info!(
        path = %path.display(),
        rows = table.len(),
        has_betting = table.has_betting(),
        "Loaded game table."
    );
    Ok(table)
}

/// Reads a game table from any CSV source with a header row.
///
/// The header is checked for every required column before any row is read.
/// The first row that fails to parse or validate rejects the whole source.
pub fn read_games<R: Read>(reader: R) -> Result<GameTable, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn(column.to_string()));
        }
    }
    let has_betting = headers.iter().any(|h| h == "was_favorite");

    let mut records = Vec::new();
    let mut row = csv::StringRecord::new();
    while csv_reader.read_record(&mut row)? {
        let line = row.position().map_or(0, |p| p.line());
        let raw: RawGameRow = row
            .deserialize(Some(&headers))
            .map_err(|err| DatasetError::MalformedRow {
                line,
                message: describe(&err),
            })?;
        let record = raw
            .into_record(has_betting)
            .map_err(|message| DatasetError::MalformedRow { line, message })?;
        records.push(record);
    }

    tracing::debug!(rows = records.len(), has_betting, "Parsed game rows.");
    Ok(GameTable::new(records, has_betting))
}

/// The field-level message of a row deserialization failure.
fn describe(err: &csv::Error) -> String {
    match err.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => err.to_string(),
    }
}
