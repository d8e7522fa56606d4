//! Welcome board domain models.
//!
//! Declared configuration as it is read from the JSON file, and the resolved board the
//! welcome service works on once every name has been bound to a Discord identifier.

use serde::{Deserialize, Serialize};
use serenity::all::{ChannelId, EmojiId, GuildId, MessageId, RoleId};

/// Welcome module configuration as declared in the configuration file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WelcomeConfig {
    /// Name of the channel holding the welcome messages.
    #[serde(default)]
    pub channel: String,
    /// Optional cron expression for periodic reconciliation passes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resync_schedule: Option<String>,
    /// Messages to keep posted, in declaration order.
    #[serde(default)]
    pub messages: Vec<WelcomeMessageConfig>,
}

/// A single declared role-granting message.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct WelcomeMessageConfig {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: u32,
    /// Name of the role granted to members reacting to the message.
    #[serde(default)]
    pub role: String,
    /// Name of the guild emoji members react with.
    #[serde(default)]
    pub emoji: String,
    #[serde(default)]
    pub can_purge_reactions: bool,
    #[serde(default)]
    pub purge_threshold_members_reacted: usize,
    #[serde(default)]
    pub purge_below_count_members_not_in_guild: usize,
}

impl WelcomeMessageConfig {
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(&self.title, &self.description, self.color)
    }

    pub fn purge_policy(&self) -> PurgePolicy {
        PurgePolicy {
            enabled: self.can_purge_reactions,
            threshold_members_reacted: self.purge_threshold_members_reacted,
            below_count_members_not_in_guild: self.purge_below_count_members_not_in_guild,
        }
    }
}

/// Content identity of a posted embed: title, description and color.
///
/// Missing embed fields compare as an empty string or a zero color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub title: String,
    pub description: String,
    pub color: u32,
}

impl Fingerprint {
    pub fn new(title: &str, description: &str, color: u32) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            color,
        }
    }
}

/// Purge policy for reactions left by users that can no longer be resolved as members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PurgePolicy {
    pub enabled: bool,
    /// Minimum number of reactors (bot included) before a purge is considered.
    pub threshold_members_reacted: usize,
    /// Maximum number of unresolvable reactors a purge may remove.
    pub below_count_members_not_in_guild: usize,
}

impl PurgePolicy {
    /// Checks if stale reactions may be removed for the given counts.
    ///
    /// # Arguments
    /// - `members_reacted` - Total number of reactors returned for the message
    /// - `members_not_in_guild` - Number of reactors whose membership lookup failed
    ///
    /// # Returns
    /// - `true` - Purge is enabled and both thresholds hold
    /// - `false` - Any of the three conditions fails
    pub fn allows(&self, members_reacted: usize, members_not_in_guild: usize) -> bool {
        self.enabled
            && members_reacted >= self.threshold_members_reacted
            && members_not_in_guild <= self.below_count_members_not_in_guild
    }
}

/// Guild emoji reference used when reacting to or scanning a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiRef {
    pub name: String,
    pub id: EmojiId,
}

impl std::fmt::Display for EmojiRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.id)
    }
}

/// A welcome message with every name bound to a Discord identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct WelcomeMessage {
    /// Title with `:emoji:` shorthands rewritten to `<:emoji:id>`.
    pub title: String,
    /// Description with `:emoji:` shorthands rewritten to `<:emoji:id>`.
    pub description: String,
    pub color: u32,
    pub role: String,
    pub role_id: RoleId,
    pub emoji: String,
    pub emoji_id: EmojiId,
    pub purge: PurgePolicy,
    /// Posted message carrying this entry, discovered or created by reconciliation.
    pub message_id: Option<MessageId>,
}

impl WelcomeMessage {
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::new(&self.title, &self.description, self.color)
    }

    pub fn emoji_ref(&self) -> EmojiRef {
        EmojiRef {
            name: self.emoji.clone(),
            id: self.emoji_id,
        }
    }
}

/// Resolved welcome board for one guild channel.
#[derive(Debug, Clone, PartialEq)]
pub struct WelcomeBoard {
    pub guild_id: GuildId,
    pub guild_name: String,
    pub channel_id: ChannelId,
    pub channel_name: String,
    pub messages: Vec<WelcomeMessage>,
}

impl WelcomeBoard {
    /// Finds the board message posted under the given message id.
    pub fn find_by_message_id(&self, message_id: MessageId) -> Option<&WelcomeMessage> {
        self.messages
            .iter()
            .find(|message| message.message_id == Some(message_id))
    }
}
