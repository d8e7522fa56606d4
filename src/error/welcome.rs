//! Welcome board configuration and resolution errors.
//!
//! Static errors are detected on the declared configuration before any network call.
//! Resolution errors are detected while binding names against the guild snapshot. Both abort
//! the construction of the welcome board.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum WelcomeError {
    #[error("welcome channel is empty")]
    EmptyChannel,

    #[error("welcome messages are empty")]
    EmptyMessages,

    /// Message at `index` has neither a title nor a description.
    #[error("welcome message #{index} has an empty title and description")]
    EmptyTitleAndDescription { index: usize },

    #[error("welcome message #{index} has an empty emoji")]
    EmptyEmoji { index: usize },

    #[error("welcome message #{index} has an empty role")]
    EmptyRole { index: usize },

    /// Two messages share title, description and color and could not be told apart once
    /// posted.
    #[error("welcome message #{index} has the same title, description and color as message #{first_index}")]
    DuplicateFingerprint { index: usize, first_index: usize },

    #[error("guild '{guild}' not found in Discord server")]
    GuildNotFound { guild: String },

    #[error("channel '{channel}' not found in guild '{guild}'")]
    ChannelNotFound { guild: String, channel: String },

    #[error("emoji '{emoji}' of welcome message #{index} not found in Discord server")]
    EmojiNotFound { index: usize, emoji: String },

    #[error("role '{role}' of welcome message #{index} not found in Discord server")]
    RoleNotFound { index: usize, role: String },
}
