use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::{error::config::ConfigError, model::welcome::WelcomeConfig};

/// Config file used when `DBOT_CONFIG_FILE` is not set.
const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Log levels accepted in `log.level`; empty falls back to `info`, `fatal` and `panic`
/// filter as `error`.
const LOG_LEVELS: [&str; 8] = [
    "", "trace", "debug", "info", "warn", "error", "fatal", "panic",
];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub discord: DiscordConfig,
    pub log: LogConfig,
    pub modules: ModulesConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Name of the guild the bot manages.
    pub name: String,
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Log file written beside stdout, parent directories are created.
    pub filename: String,
    pub level: String,
    /// Rotated log files kept on `SIGHUP`.
    pub number_files_rotation: usize,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModulesConfig {
    /// Welcome board, disabled when absent.
    pub welcome: Option<WelcomeConfig>,
}

impl Config {
    /// Loads the configuration file and applies environment overrides.
    ///
    /// # Arguments
    /// - `path` - JSON configuration file
    ///
    /// # Returns
    /// - `Ok(Config)` - Parsed and validated configuration
    /// - `Err(ConfigError)` - File unreadable, malformed, or failing validation
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::parse(&contents).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })?;

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(contents)
    }

    /// Overrides file values with `DBOT_DISCORD_NAME`, `DBOT_DISCORD_TOKEN`,
    /// `DBOT_LOG_FILENAME`, `DBOT_LOG_LEVEL` and `DBOT_LOG_NUMBER_FILES_ROTATION` when `lookup`
    /// returns them. A rotation count that is not a number is ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("DBOT_DISCORD_NAME") {
            self.discord.name = name;
        }
        if let Some(token) = lookup("DBOT_DISCORD_TOKEN") {
            self.discord.token = token;
        }
        if let Some(filename) = lookup("DBOT_LOG_FILENAME") {
            self.log.filename = filename;
        }
        if let Some(level) = lookup("DBOT_LOG_LEVEL") {
            self.log.level = level;
        }
        if let Some(count) = lookup("DBOT_LOG_NUMBER_FILES_ROTATION") {
            if let Ok(count) = count.trim().parse() {
                self.log.number_files_rotation = count;
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.discord.name.is_empty() {
            return Err(ConfigError::EmptyDiscordName);
        }

        if self.discord.token.is_empty() {
            return Err(ConfigError::EmptyDiscordToken);
        }

        if self.log.filename.trim().is_empty() {
            return Err(ConfigError::EmptyLogFilename);
        }

        if !LOG_LEVELS.contains(&self.log.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(self.log.level.clone()));
        }

        Ok(())
    }
}

/// Path of the configuration file, from `DBOT_CONFIG_FILE` or the default.
pub fn config_path() -> PathBuf {
    std::env::var("DBOT_CONFIG_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE))
}
