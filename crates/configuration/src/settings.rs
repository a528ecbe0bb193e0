use crate::error::ConfigError;
use core_types::FilterCriteria;
use serde::Deserialize;
use std::path::PathBuf;

/// The root configuration structure for the entire application.
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataSettings,
    pub display: DisplaySettings,
    pub export: ExportSettings,
    pub logging: LoggingSettings,
    /// The query a session starts from, and returns to on reset.
    pub query: FilterCriteria,
}

/// Where the game table is read from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub path: PathBuf,
}

/// Parameters for rendering results in the terminal.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Maximum number of filtered rows shown in the preview table.
    pub preview_rows: usize,
    /// Number of bins in the win-percentage histogram.
    pub histogram_bins: usize,
    /// Width, in characters, of the longest bar in a chart.
    pub chart_width: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Default destination for CSV exports.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive when `RUST_LOG` is not set (e.g. "info", "analyzer=debug").
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    pub directory: Option<PathBuf>,
    pub file_prefix: String,
}

// --- Default Implementations ---

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/mlb_team_games.csv"),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            preview_rows: 50,
            histogram_bins: 20,
            chart_width: 40,
        }
    }
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("filtered_results.csv"),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
            file_prefix: "gamefinder.log".to_string(),
        }
    }
}

impl Config {
    /// Rejects values that would make rendering or the default query meaningless.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.preview_rows == 0 {
            return Err(ConfigError::ValidationError(
                "display.preview_rows must be greater than 0".to_string(),
            ));
        }
        if self.display.histogram_bins == 0 {
            return Err(ConfigError::ValidationError(
                "display.histogram_bins must be greater than 0".to_string(),
            ));
        }
        if self.display.chart_width == 0 {
            return Err(ConfigError::ValidationError(
                "display.chart_width must be greater than 0".to_string(),
            ));
        }
        self.query
            .validate()
            .map_err(|e| ConfigError::ValidationError(format!("query: {}", e)))?;
        Ok(())
    }
}
