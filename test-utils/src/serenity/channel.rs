//! Test factory for creating Serenity GuildChannel objects.

use serenity::all::GuildChannel;

/// Creates a test Serenity GuildChannel.
///
/// # Arguments
/// - `channel_id` - Discord channel ID (snowflake)
/// - `guild_id` - Discord guild ID the channel belongs to
/// - `name` - Channel name
/// - `kind` - Discord channel type code (0 = text, 2 = voice, 4 = category, 5 = announcement)
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::channel::create_test_channel;
///
/// let channel = create_test_channel(11, 1000, "welcome", 0);
/// assert_eq!(channel.name, "welcome");
/// ```
pub fn create_test_channel(channel_id: u64, guild_id: u64, name: &str, kind: u8) -> GuildChannel {
    serde_json::from_value(serde_json::json!({
        "id": channel_id.to_string(),
        "guild_id": guild_id.to_string(),
        "type": kind,
        "name": name,
        "position": 0,
        "permission_overwrites": [],
        "nsfw": false,
        "flags": 0,
    }))
    .expect("Failed to create test channel - invalid JSON structure")
}
