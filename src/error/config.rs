use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("Failed to read configuration file {path}: {source}")]
    ReadFile {
        /// Path of the configuration file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON or does not match the expected shape.
    #[error("Failed to parse configuration file {path}: {source}")]
    ParseFile {
        /// Path of the configuration file
        path: PathBuf,
        /// The underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// `discord.name` is empty after environment overrides.
    #[error("invalid json value: discord.name is empty")]
    EmptyDiscordName,

    /// `discord.token` is empty after environment overrides.
    #[error("invalid json value: discord.token is empty")]
    EmptyDiscordToken,

    /// `log.filename` is empty after environment overrides.
    #[error("invalid json value: log.filename is empty")]
    EmptyLogFilename,

    /// `log.level` is not a known log level.
    #[error("invalid json value: log.level '{0}' is invalid")]
    InvalidLogLevel(String),
}
