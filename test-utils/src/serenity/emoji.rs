//! Test factory for creating Serenity Emoji objects.

use serenity::all::Emoji;

/// Creates a test Serenity guild Emoji.
///
/// The emoji is static (not animated), available, not managed and requires colons,
/// matching a regular custom emoji uploaded to a guild.
///
/// # Arguments
/// - `emoji_id` - Discord emoji ID (snowflake)
/// - `name` - Emoji name without colons
///
/// # Panics
/// - If the JSON cannot be deserialized into an Emoji (indicates invalid test data)
pub fn create_test_emoji(emoji_id: u64, name: &str) -> Emoji {
    serde_json::from_value(serde_json::json!({
        "id": emoji_id.to_string(),
        "name": name,
        "animated": false,
        "available": true,
        "managed": false,
        "require_colons": true,
        "roles": [],
    }))
    .expect("Failed to create test emoji - invalid JSON structure")
}
