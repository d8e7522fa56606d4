//! Test factory for creating Serenity Guild objects.
//!
//! Guilds are created by deserializing JSON, simulating what the gateway delivers on
//! `GUILD_CREATE`, then populated with channels, roles and emojis through `TestGuildBuilder`.

use serenity::all::{ChannelId, EmojiId, Guild, RoleId, UserId};

use super::{
    channel::create_test_channel, emoji::create_test_emoji, member::create_test_member,
    role::create_test_role,
};

/// Creates an empty test Serenity Guild.
///
/// The guild has no channels, roles, emojis or members. All other fields are set to
/// reasonable defaults.
///
/// # Arguments
/// - `guild_id` - Discord guild ID (snowflake)
/// - `name` - Guild name
///
/// # Panics
/// - If the JSON cannot be deserialized into a Guild (indicates invalid test data)
pub fn create_test_guild(guild_id: u64, name: &str) -> Guild {
    serde_json::from_value(serde_json::json!({
        "id": guild_id.to_string(),
        "name": name,
        "icon": null,
        "owner_id": "100000000000000000",
        "afk_timeout": 300,
        "verification_level": 0,
        "default_message_notifications": 0,
        "explicit_content_filter": 0,
        "roles": [],
        "emojis": [],
        "stickers": [],
        "features": [],
        "mfa_level": 0,
        "system_channel_flags": 0,
        "premium_tier": 0,
        "premium_subscription_count": 0,
        "premium_progress_bar_enabled": false,
        "preferred_locale": "en-US",
        "nsfw_level": 0,
        "joined_at": "2020-01-01T00:00:00.000000+00:00",
        "large": false,
        "member_count": 100,
        "voice_states": [],
        "channels": [],
        "threads": [],
        "presences": [],
        "max_presences": 25000,
        "max_members": 100000,
        "unavailable": false,
        "members": [],
        "stage_instances": [],
        "guild_scheduled_events": [],
    }))
    .expect("Failed to create test guild - invalid JSON structure")
}

/// Builder for test guilds carrying named channels, roles and emojis.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::serenity::TestGuildBuilder;
///
/// let guild = TestGuildBuilder::new(1000, "My Guild")
///     .text_channel(11, "welcome")
///     .role(20, "Verified")
///     .emoji(40, "check")
///     .build();
/// ```
pub struct TestGuildBuilder {
    guild: Guild,
}

impl TestGuildBuilder {
    pub fn new(guild_id: u64, name: &str) -> Self {
        Self {
            guild: create_test_guild(guild_id, name),
        }
    }

    /// Adds a text channel (type 0).
    pub fn text_channel(self, channel_id: u64, name: &str) -> Self {
        self.channel(channel_id, name, 0)
    }

    /// Adds a channel of any Discord channel type code.
    pub fn channel(mut self, channel_id: u64, name: &str, kind: u8) -> Self {
        let guild_id = self.guild.id.get();
        self.guild.channels.insert(
            ChannelId::new(channel_id),
            create_test_channel(channel_id, guild_id, name, kind),
        );
        self
    }

    pub fn role(mut self, role_id: u64, name: &str) -> Self {
        let guild_id = self.guild.id.get();
        self.guild
            .roles
            .insert(RoleId::new(role_id), create_test_role(role_id, guild_id, name));
        self
    }

    pub fn emoji(mut self, emoji_id: u64, name: &str) -> Self {
        self.guild
            .emojis
            .insert(EmojiId::new(emoji_id), create_test_emoji(emoji_id, name));
        self
    }

    /// Adds a member holding the given roles.
    pub fn member(mut self, user_id: u64, role_ids: &[u64]) -> Self {
        let guild_id = self.guild.id.get();
        self.guild.members.insert(
            UserId::new(user_id),
            create_test_member(user_id, guild_id, role_ids),
        );
        self
    }

    pub fn build(self) -> Guild {
        self.guild
    }
}
