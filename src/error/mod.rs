//! Error types for the welcome board bot.
//!
//! `AppError` is the top-level error type returned by the bot, the welcome service and the
//! Discord port. Domain-specific errors live in their own modules and convert into it with
//! `#[from]`.

pub mod config;
pub mod welcome;

use thiserror::Error;

use crate::error::{config::ConfigError, welcome::WelcomeError};

/// Top-level application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration file or environment error during startup.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Welcome configuration is invalid or does not match the Discord server.
    ///
    /// Fatal to the construction of the welcome board; nothing is posted or granted.
    #[error(transparent)]
    WelcomeErr(#[from] WelcomeError),

    /// Discord API error from Serenity.
    ///
    /// Boxed due to large size. Aborts the current reconciliation pass.
    #[error(transparent)]
    DiscordErr(#[from] Box<serenity::Error>),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Logging subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingErr(String),

    /// Resource not found error.
    ///
    /// # Fields
    /// - Message describing what resource was not found
    #[error("{0}")]
    NotFound(String),

    /// Internal error with custom message.
    ///
    /// # Fields
    /// - Detailed error message for logging
    #[error("{0}")]
    InternalError(String),
}

/// Manual conversion from serenity::Error to AppError.
///
/// Boxes the error to reduce the size of the AppError enum, as serenity::Error
/// is very large and would make all AppError variants larger if not boxed.
impl From<serenity::Error> for AppError {
    fn from(err: serenity::Error) -> Self {
        AppError::DiscordErr(Box::new(err))
    }
}
