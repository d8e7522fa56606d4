//! Test factory for creating Serenity Member objects.

use serenity::all::Member;

use super::message::user_json;

/// Creates a test Serenity Member holding the given roles.
///
/// # Arguments
/// - `user_id` - Discord user ID of the member
/// - `guild_id` - Discord guild ID the member belongs to
/// - `role_ids` - Roles held by the member
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
pub fn create_test_member(user_id: u64, guild_id: u64, role_ids: &[u64]) -> Member {
    let roles: Vec<String> = role_ids.iter().map(|id| id.to_string()).collect();

    serde_json::from_value(serde_json::json!({
        "user": user_json(user_id, &format!("user{}", user_id), false),
        "nick": null,
        "avatar": null,
        "roles": roles,
        "joined_at": "2020-01-01T00:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "guild_id": guild_id.to_string(),
    }))
    .expect("Failed to create test member - invalid JSON structure")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serenity::all::RoleId;

    #[test]
    fn creates_member_with_roles() {
        let member = create_test_member(7, 1000, &[21, 22]);

        assert_eq!(member.user.id.get(), 7);
        assert_eq!(member.guild_id.get(), 1000);
        assert_eq!(member.roles, vec![RoleId::new(21), RoleId::new(22)]);
    }
}
