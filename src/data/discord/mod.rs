//! Discord port used by the welcome service.
//!
//! `DiscordApi` lists every remote call reconciliation and the reaction handlers make.
//! `SerenityDiscordApi` implements it over the serenity HTTP client and gateway cache.
//!
//! Pagination cursors (`before` for messages, `after` for reactors) rely on Discord
//! snowflakes being monotonically ordered.

pub mod client;

#[cfg(test)]
pub mod fake;

use serenity::all::{ChannelId, GuildId, MessageId, RoleId, UserId};
use serenity::async_trait;

use crate::{
    error::AppError,
    model::{discord::PostedMessage, welcome::EmojiRef},
};

pub use client::SerenityDiscordApi;

#[async_trait]
pub trait DiscordApi: Send + Sync {
    /// Identifier of the bot's own user.
    fn current_user_id(&self) -> UserId;

    /// Lists up to `limit` most recent messages of a channel, newest first.
    ///
    /// # Arguments
    /// - `before` - Only return messages older than this one
    async fn list_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
        before: Option<MessageId>,
    ) -> Result<Vec<PostedMessage>, AppError>;

    /// Posts an embed with the given title, description and color.
    ///
    /// # Returns
    /// - `Ok(MessageId)` - Identifier of the posted message
    async fn send_embed(
        &self,
        channel_id: ChannelId,
        title: &str,
        description: &str,
        color: u32,
    ) -> Result<MessageId, AppError>;

    /// Adds the bot's own reaction to a message.
    async fn add_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &EmojiRef,
    ) -> Result<(), AppError>;

    /// Removes a user's reaction from a message.
    async fn remove_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &EmojiRef,
        user_id: UserId,
    ) -> Result<(), AppError>;

    /// Lists one page of users who reacted with `emoji`, ordered by user id.
    ///
    /// An empty page marks the end of the reactors.
    async fn list_reactors(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &EmojiRef,
        after: Option<UserId>,
        limit: u8,
    ) -> Result<Vec<UserId>, AppError>;

    /// Looks up a member's roles.
    ///
    /// Fails with `AppError::NotFound` when the member is not known locally, which does not
    /// necessarily mean the user has left the guild.
    async fn member_roles(&self, guild_id: GuildId, user_id: UserId)
        -> Result<Vec<RoleId>, AppError>;

    async fn grant_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), AppError>;

    async fn revoke_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), AppError>;
}
