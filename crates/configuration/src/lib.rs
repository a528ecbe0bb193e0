use crate::error::ConfigError;
use config::{Environment, File, FileFormat};
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{Config, DataSettings, DisplaySettings, ExportSettings, LoggingSettings};

/// File read when no explicit path is given. It may be absent.
pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Prefix for environment overrides, e.g. `GAMEFINDER__DATA__PATH`.
pub const ENV_PREFIX: &str = "GAMEFINDER";

/// Loads the application configuration.
///
/// Sources, in increasing priority: built-in defaults, the TOML file at
/// `path` (required when given, otherwise `config.toml` if present), then
/// `GAMEFINDER__SECTION__KEY` environment variables.
pub fn load_config(path: Option<&Path>) -> Result<Config, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).format(FileFormat::Toml).required(true),
        None => File::with_name(DEFAULT_CONFIG_FILE)
            .format(FileFormat::Toml)
            .required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config = builder.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}

/// Parses configuration from TOML text alone, without file or environment lookups.
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config = config::Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}
