mod rotate;

use std::path::Path;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{config::LogConfig, error::AppError};

use rotate::RotatingFile;

/// Level used when neither `RUST_LOG` nor the configuration sets one.
const DEFAULT_LOG_LEVEL: &str = "info";

/// Installs the global tracing subscriber, writing to stdout and to `log.filename`.
///
/// `RUST_LOG` takes precedence; otherwise the configured level applies to every target.
/// On unix the log file is rotated whenever the process receives `SIGHUP`, so this must be
/// called from within the tokio runtime.
///
/// # Arguments
/// - `config` - Configured `log` section
///
/// # Returns
/// - `Ok(())` - Subscriber installed
/// - `Err(AppError::LoggingErr)` - Log file unusable or a global subscriber was already set
pub fn init(config: &LogConfig) -> Result<(), AppError> {
    let file = RotatingFile::open(Path::new(&config.filename), config.number_files_rotation)
        .map_err(|e| {
            AppError::LoggingErr(format!("cannot open log file {}: {}", config.filename, e))
        })?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(&config.level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(file.clone()),
        )
        .try_init()
        .map_err(|e| AppError::LoggingErr(e.to_string()))?;

    tracing::info!(
        "Logging to {} keeping {} rotated files",
        config.filename,
        config.number_files_rotation
    );

    #[cfg(unix)]
    rotate_on_hangup(file)?;

    Ok(())
}

#[cfg(unix)]
fn rotate_on_hangup(file: RotatingFile) -> Result<(), AppError> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut hangup = signal(SignalKind::hangup())
        .map_err(|e| AppError::LoggingErr(format!("cannot listen for SIGHUP: {}", e)))?;

    tokio::spawn(async move {
        while hangup.recv().await.is_some() {
            match file.rotate() {
                Ok(()) => tracing::info!("Log file rotated"),
                Err(e) => tracing::error!("Failed to rotate log file: {}", e),
            }
        }
    });

    Ok(())
}

/// Maps a configured level to a tracing filter directive.
///
/// Tracing has nothing above `error`, so `fatal` and `panic` are treated as `error`.
fn filter_directive(level: &str) -> &str {
    match level {
        "" => DEFAULT_LOG_LEVEL,
        "fatal" | "panic" => "error",
        level => level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_level_falls_back_to_default() {
        assert_eq!(filter_directive(""), "info");
        assert_eq!(filter_directive("debug"), "debug");
    }

    /// Tests the levels tracing has no direct equivalent for.
    ///
    /// Expected: `fatal` and `panic` filter at `error`
    #[test]
    fn fatal_and_panic_map_to_error() {
        assert_eq!(filter_directive("fatal"), "error");
        assert_eq!(filter_directive("panic"), "error");
        assert_eq!(filter_directive("error"), "error");
    }
}
