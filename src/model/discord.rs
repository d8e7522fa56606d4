//! Discord-facing domain models.
//!
//! Plain views over serenity models that the welcome service consumes: a read-only snapshot
//! of a guild's named resources, a posted channel message reduced to what reconciliation
//! compares, and a single reaction notification.

use serenity::all::{
    ChannelId, ChannelType, EmojiId, Guild, GuildId, Message, MessageId, Reaction, ReactionType,
    RoleId, UserId,
};

use crate::model::welcome::Fingerprint;

/// Named Discord resource with its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Named<Id> {
    pub name: String,
    pub id: Id,
}

impl<Id> Named<Id> {
    pub fn new(name: impl Into<String>, id: Id) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

/// Read-only snapshot of a guild's channels, roles and emojis.
///
/// Entries are ordered by identifier, which follows creation order for snowflakes, so
/// first-match lookups are deterministic across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuildSnapshot {
    pub id: GuildId,
    pub name: String,
    pub channels: Vec<Named<ChannelId>>,
    pub roles: Vec<Named<RoleId>>,
    pub emojis: Vec<Named<EmojiId>>,
}

impl GuildSnapshot {
    /// Builds a snapshot from a cached serenity guild.
    ///
    /// Only text and announcement channels are kept, the others cannot hold embeds.
    pub fn from_guild(guild: &Guild) -> Self {
        let mut channels: Vec<Named<ChannelId>> = guild
            .channels
            .values()
            .filter(|channel| matches!(channel.kind, ChannelType::Text | ChannelType::News))
            .map(|channel| Named::new(channel.name.clone(), channel.id))
            .collect();
        channels.sort_by_key(|channel| channel.id);

        let mut roles: Vec<Named<RoleId>> = guild
            .roles
            .values()
            .map(|role| Named::new(role.name.clone(), role.id))
            .collect();
        roles.sort_by_key(|role| role.id);

        let mut emojis: Vec<Named<EmojiId>> = guild
            .emojis
            .values()
            .map(|emoji| Named::new(emoji.name.clone(), emoji.id))
            .collect();
        emojis.sort_by_key(|emoji| emoji.id);

        Self {
            id: guild.id,
            name: guild.name.clone(),
            channels,
            roles,
            emojis,
        }
    }
}

/// A channel message as seen by reconciliation.
#[derive(Debug, Clone, PartialEq)]
pub struct PostedMessage {
    pub id: MessageId,
    pub author_id: UserId,
    /// Fingerprint of the first embed, `None` when the message has no embed.
    pub embed: Option<Fingerprint>,
}

impl PostedMessage {
    pub fn from_message(message: &Message) -> Self {
        let embed = message.embeds.first().map(|embed| Fingerprint {
            title: embed.title.clone().unwrap_or_default(),
            description: embed.description.clone().unwrap_or_default(),
            color: embed.colour.map(|colour| colour.0).unwrap_or(0),
        });

        Self {
            id: message.id,
            author_id: message.author.id,
            embed,
        }
    }
}

/// Single reaction added or removed notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    /// Emoji name, `None` for custom emojis the gateway sent without a name.
    pub emoji_name: Option<String>,
}

impl ReactionEvent {
    /// Converts a gateway reaction into an event.
    ///
    /// # Returns
    /// - `Some(ReactionEvent)` - Reaction carries the acting user
    /// - `None` - Reaction payload has no user id and cannot be attributed
    pub fn from_reaction(reaction: &Reaction) -> Option<Self> {
        let user_id = reaction.user_id?;

        let emoji_name = match &reaction.emoji {
            ReactionType::Custom { name, .. } => name.clone(),
            ReactionType::Unicode(name) => Some(name.clone()),
            _ => None,
        };

        Some(Self {
            channel_id: reaction.channel_id,
            message_id: reaction.message_id,
            user_id,
            emoji_name,
        })
    }
}
