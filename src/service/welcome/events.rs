//! Live reaction handling for managed welcome messages.

use crate::{
    data::discord::DiscordApi,
    model::{discord::ReactionEvent, welcome::WelcomeMessage},
    service::welcome::WelcomeService,
};

/// Why a reaction event was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Reaction happened outside the welcome channel.
    ForeignChannel,
    /// Reaction was added or removed by the bot itself.
    OwnReaction,
    /// Message is not a posted welcome message.
    UnmanagedMessage,
    /// Emoji differs from the message's configured emoji.
    EmojiMismatch,
}

/// Decision taken for a reaction event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactionOutcome {
    Ignored(IgnoreReason),
    /// The role was granted or revoked.
    Applied,
    /// The role mutation was attempted and failed.
    Failed,
}

impl<A: DiscordApi> WelcomeService<A> {
    /// Finds the welcome message a reaction event applies to.
    fn managed_message(&self, event: &ReactionEvent) -> Result<&WelcomeMessage, IgnoreReason> {
        if event.channel_id != self.board.channel_id {
            return Err(IgnoreReason::ForeignChannel);
        }

        if event.user_id == self.bot_id {
            return Err(IgnoreReason::OwnReaction);
        }

        let message = self
            .board
            .find_by_message_id(event.message_id)
            .ok_or(IgnoreReason::UnmanagedMessage)?;

        if event.emoji_name.as_deref() != Some(message.emoji.as_str()) {
            return Err(IgnoreReason::EmojiMismatch);
        }

        Ok(message)
    }

    /// Grants the message's role to the user who added a matching reaction.
    ///
    /// Failures are logged and not retried.
    pub async fn on_reaction_add(&self, event: &ReactionEvent) -> ReactionOutcome {
        let message = match self.managed_message(event) {
            Ok(message) => message,
            Err(reason) => return ReactionOutcome::Ignored(reason),
        };

        tracing::info!(
            "Reaction added on message {} by user {}, adding role {} ('{}')",
            event.message_id,
            event.user_id,
            message.role_id,
            message.role
        );

        match self
            .api
            .grant_role(self.board.guild_id, event.user_id, message.role_id)
            .await
        {
            Ok(()) => ReactionOutcome::Applied,
            Err(e) => {
                tracing::error!(
                    "Failed to add role {} ('{}') to user {}: {}",
                    message.role_id,
                    message.role,
                    event.user_id,
                    e
                );
                ReactionOutcome::Failed
            }
        }
    }

    /// Revokes the message's role from the user who removed a matching reaction.
    ///
    /// Failures are logged and not retried.
    pub async fn on_reaction_remove(&self, event: &ReactionEvent) -> ReactionOutcome {
        let message = match self.managed_message(event) {
            Ok(message) => message,
            Err(reason) => return ReactionOutcome::Ignored(reason),
        };

        tracing::info!(
            "Reaction removed on message {} by user {}, removing role {} ('{}')",
            event.message_id,
            event.user_id,
            message.role_id,
            message.role
        );

        match self
            .api
            .revoke_role(self.board.guild_id, event.user_id, message.role_id)
            .await
        {
            Ok(()) => ReactionOutcome::Applied,
            Err(e) => {
                tracing::error!(
                    "Failed to remove role {} ('{}') from user {}: {}",
                    message.role_id,
                    message.role,
                    event.user_id,
                    e
                );
                ReactionOutcome::Failed
            }
        }
    }
}
