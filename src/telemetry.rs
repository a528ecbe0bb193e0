use configuration::LoggingSettings;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Console output goes to stderr so
/// it never mixes with tables on stdout. When a log directory is configured a
/// daily rolling file is written as well; the returned guard must be held
/// until exit to flush it.
pub fn init(settings: &LoggingSettings) -> anyhow::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&settings.level))?;

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    let (file_layer, guard) = match &settings.directory {
        Some(directory) => {
            let appender = file_appender(settings, directory)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(guard)
}

/// Opens the daily log file in `directory`, reporting an unusable directory as
/// an error instead of panicking.
fn file_appender(
    settings: &LoggingSettings,
    directory: &Path,
) -> anyhow::Result<RollingFileAppender> {
    std::fs::create_dir_all(directory)?;
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&settings.file_prefix)
        .build(directory)?;
    Ok(appender)
}
