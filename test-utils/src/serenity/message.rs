//! Test factories for creating Serenity Message and User objects.

use serenity::all::{Message, User};

/// Creates a test Serenity User.
///
/// # Arguments
/// - `user_id` - Discord user ID (snowflake)
/// - `name` - Username
/// - `bot` - Whether the account is a bot account
///
/// # Panics
/// - If the JSON cannot be deserialized into a User (indicates invalid test data)
pub fn create_test_user(user_id: u64, name: &str, bot: bool) -> User {
    serde_json::from_value(user_json(user_id, name, bot))
        .expect("Failed to create test user - invalid JSON structure")
}

/// Creates a test Serenity Message with rich embeds.
///
/// The message has no text content; each `(title, description, color)` tuple becomes one
/// embed, in order. Pass an empty slice for a plain message without embeds.
///
/// # Arguments
/// - `message_id` - Discord message ID (snowflake)
/// - `channel_id` - Channel the message was posted in
/// - `author_id` - User ID of the author
/// - `embeds` - Embeds as `(title, description, color)` tuples
///
/// # Panics
/// - If the JSON cannot be deserialized into a Message (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::message::create_test_message;
///
/// let message = create_test_message(500, 11, 7, &[("Rules", "Be nice", 0x00ff00)]);
/// assert_eq!(message.embeds.len(), 1);
/// ```
pub fn create_test_message(
    message_id: u64,
    channel_id: u64,
    author_id: u64,
    embeds: &[(&str, &str, u32)],
) -> Message {
    let embeds: Vec<serde_json::Value> = embeds
        .iter()
        .map(|(title, description, color)| {
            serde_json::json!({
                "type": "rich",
                "title": title,
                "description": description,
                "color": color,
            })
        })
        .collect();

    serde_json::from_value(serde_json::json!({
        "id": message_id.to_string(),
        "channel_id": channel_id.to_string(),
        "author": user_json(author_id, "author", false),
        "content": "",
        "timestamp": "2024-01-01T00:00:00.000000+00:00",
        "edited_timestamp": null,
        "tts": false,
        "mention_everyone": false,
        "mentions": [],
        "mention_roles": [],
        "attachments": [],
        "embeds": embeds,
        "pinned": false,
        "type": 0,
    }))
    .expect("Failed to create test message - invalid JSON structure")
}

pub(crate) fn user_json(user_id: u64, name: &str, bot: bool) -> serde_json::Value {
    serde_json::json!({
        "id": user_id.to_string(),
        "username": name,
        "discriminator": "0",
        "global_name": null,
        "avatar": null,
        "bot": bot,
    })
}
