use crate::error::DatasetError;
use crate::schema::{BETTING_COLUMNS, REQUIRED_COLUMNS, SEASON_COLUMN};
use core_types::{GameRecord, GameTable};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes `table` to `path` in the load schema, replacing any existing file.
///
/// The rows are written to a hidden sibling file first and renamed into place,
/// so a failed export never leaves a partial file at `path`.
pub fn export_games(table: &GameTable, path: &Path) -> Result<(), DatasetError> {
    let staging = staging_path(path);
    let fail = |message: String| DatasetError::Export {
        path: path.to_path_buf(),
        message,
    };

    let result = fs::File::create(&staging)
        .map_err(|e| fail(e.to_string()))
        .and_then(|file| write_games(table, file).map_err(|e| fail(e.to_string())))
        .and_then(|()| fs::rename(&staging, path).map_err(|e| fail(e.to_string())));

    if let Err(err) = result {
        // The staging file may not exist if creation itself failed.
        let _ = fs::remove_file(&staging);
        tracing::error!(path = %path.display(), error = %err, "Export failed.");
        return Err(err);
    }

    tracing::info!(path = %path.display(), rows = table.len(), "Exported filtered games.");
    Ok(())
}

/// Writes `table` as CSV with a header row to any writer.
pub fn write_games<W: Write>(table: &GameTable, writer: W) -> Result<(), DatasetError> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header: Vec<&str> = REQUIRED_COLUMNS.to_vec();
    header.insert(4, SEASON_COLUMN);
    if table.has_betting() {
        header.extend(BETTING_COLUMNS);
    }
    csv_writer.write_record(&header)?;

    for record in table {
        csv_writer.write_record(row_fields(record, table.has_betting()))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Field values in header order: the required columns with `season` after
/// `home_away`, then the betting columns when present.
fn row_fields(record: &GameRecord, has_betting: bool) -> Vec<String> {
    let mut fields = vec![
        record.date.format("%Y-%m-%d").to_string(),
        record.team.clone(),
        record.opponent.clone(),
        record.home_away.to_string(),
        opt(record.season),
        record.result.to_string(),
        record.team_score.to_string(),
        record.opp_score.to_string(),
        record.team_win_pct.to_string(),
        record.team_win_streak.to_string(),
        record.team_loss_streak.to_string(),
    ];
    if has_betting {
        let line = record.betting.clone().unwrap_or_default();
        fields.extend([
            opt(line.was_favorite),
            opt(line.closing_moneyline),
            opt(line.covered_runline),
            opt(line.hit_over),
            opt(line.roi_per_100_bet),
        ]);
    }
    fields
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn staging_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "export.csv".to_string());
    path.with_file_name(format!(".{}.partial", name))
}
