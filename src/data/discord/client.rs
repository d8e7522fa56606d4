use serenity::{
    all::{
        ChannelId, CreateEmbed, CreateMessage, GetMessages, Guild, GuildId, MessageId,
        ReactionType, RoleId, UserId,
    },
    async_trait,
    cache::Cache,
    http::Http,
};
use std::sync::Arc;

use crate::{
    data::discord::DiscordApi,
    error::AppError,
    model::{discord::PostedMessage, welcome::EmojiRef},
};

/// Audit log reason attached to role changes made by the welcome board.
const AUDIT_LOG_REASON: &str = "welcome board reaction";

/// `DiscordApi` backed by the serenity HTTP client and gateway cache.
///
/// Member lookups only read the cache, so members missing from it (for instance after
/// they left while the bot was offline) are reported as not found.
pub struct SerenityDiscordApi {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

impl SerenityDiscordApi {
    pub fn new(http: Arc<Http>, cache: Arc<Cache>) -> Self {
        Self { http, cache }
    }
}

fn reaction_type(emoji: &EmojiRef) -> ReactionType {
    ReactionType::Custom {
        animated: false,
        id: emoji.id,
        name: Some(emoji.name.clone()),
    }
}

/// Roles of a member of a cached guild, `None` when the member is not cached.
fn member_roles_in(guild: &Guild, user_id: UserId) -> Option<Vec<RoleId>> {
    guild
        .members
        .get(&user_id)
        .map(|member| member.roles.clone())
}

#[async_trait]
impl DiscordApi for SerenityDiscordApi {
    fn current_user_id(&self) -> UserId {
        self.cache.current_user().id
    }

    async fn list_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
        before: Option<MessageId>,
    ) -> Result<Vec<PostedMessage>, AppError> {
        let mut builder = GetMessages::new().limit(limit);
        if let Some(before) = before {
            builder = builder.before(before);
        }

        let messages = channel_id.messages(&self.http, builder).await?;

        Ok(messages.iter().map(PostedMessage::from_message).collect())
    }

    async fn send_embed(
        &self,
        channel_id: ChannelId,
        title: &str,
        description: &str,
        color: u32,
    ) -> Result<MessageId, AppError> {
        let mut embed = CreateEmbed::new().colour(color);
        if !title.is_empty() {
            embed = embed.title(title);
        }
        if !description.is_empty() {
            embed = embed.description(description);
        }

        let message = channel_id
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;

        Ok(message.id)
    }

    async fn add_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &EmojiRef,
    ) -> Result<(), AppError> {
        self.http
            .create_reaction(channel_id, message_id, &reaction_type(emoji))
            .await?;

        Ok(())
    }

    async fn remove_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &EmojiRef,
        user_id: UserId,
    ) -> Result<(), AppError> {
        self.http
            .delete_reaction(channel_id, message_id, user_id, &reaction_type(emoji))
            .await?;

        Ok(())
    }

    async fn list_reactors(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &EmojiRef,
        after: Option<UserId>,
        limit: u8,
    ) -> Result<Vec<UserId>, AppError> {
        let users = self
            .http
            .get_reaction_users(
                channel_id,
                message_id,
                &reaction_type(emoji),
                limit,
                after.map(|user_id| user_id.get()),
            )
            .await?;

        Ok(users.iter().map(|user| user.id).collect())
    }

    async fn member_roles(
        &self,
        guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Vec<RoleId>, AppError> {
        self.cache
            .guild(guild_id)
            .and_then(|guild| member_roles_in(&guild, user_id))
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "Member {} not found in guild {} cache",
                    user_id, guild_id
                ))
            })
    }

    async fn grant_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), AppError> {
        self.http
            .add_member_role(guild_id, user_id, role_id, Some(AUDIT_LOG_REASON))
            .await?;

        Ok(())
    }

    async fn revoke_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), AppError> {
        self.http
            .remove_member_role(guild_id, user_id, role_id, Some(AUDIT_LOG_REASON))
            .await?;

        Ok(())
    }
}
