//! Test factory for creating Serenity Reaction objects.

use serenity::all::Reaction;

/// Creates a test Serenity Reaction as delivered by the gateway.
///
/// # Arguments
/// - `channel_id` - Channel of the reacted message
/// - `message_id` - Reacted message ID
/// - `user_id` - Acting user, `None` to simulate a payload without user
/// - `emoji_id` - Custom emoji ID, `None` for a unicode emoji
/// - `emoji_name` - Custom emoji name or the unicode character itself
///
/// # Panics
/// - If the JSON cannot be deserialized into a Reaction (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::reaction::create_test_reaction;
///
/// // Custom guild emoji
/// let reaction = create_test_reaction(11, 500, Some(8), Some(40), "check");
///
/// // Unicode emoji
/// let reaction = create_test_reaction(11, 500, Some(8), None, "✅");
/// ```
pub fn create_test_reaction(
    channel_id: u64,
    message_id: u64,
    user_id: Option<u64>,
    emoji_id: Option<u64>,
    emoji_name: &str,
) -> Reaction {
    let emoji = match emoji_id {
        Some(id) => serde_json::json!({
            "id": id.to_string(),
            "name": emoji_name,
            "animated": false,
        }),
        None => serde_json::json!({ "name": emoji_name }),
    };

    serde_json::from_value(serde_json::json!({
        "channel_id": channel_id.to_string(),
        "message_id": message_id.to_string(),
        "user_id": user_id.map(|id| id.to_string()),
        "emoji": emoji,
        "burst": false,
        "burst_colors": [],
        "type": 0,
    }))
    .expect("Failed to create test reaction - invalid JSON structure")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::ReactionType;

    #[test]
    fn creates_custom_emoji_reaction() {
        let reaction = create_test_reaction(11, 500, Some(8), Some(40), "check");

        assert_eq!(reaction.channel_id.get(), 11);
        assert_eq!(reaction.message_id.get(), 500);
        assert_eq!(reaction.user_id.map(|id| id.get()), Some(8));
        assert!(matches!(
            reaction.emoji,
            ReactionType::Custom { id, .. } if id.get() == 40
        ));
    }

    #[test]
    fn creates_reaction_without_user() {
        let reaction = create_test_reaction(11, 500, None, None, "✅");

        assert_eq!(reaction.user_id, None);
        assert!(matches!(reaction.emoji, ReactionType::Unicode(ref name) if name == "✅"));
    }
}
