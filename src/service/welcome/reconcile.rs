//! Message reconciliation: matches posted embeds to declared messages and posts the
//! missing ones.

use serenity::all::MessageId;

use crate::{
    data::discord::DiscordApi, error::AppError, model::welcome::WelcomeMessage,
    service::welcome::WelcomeService,
};

/// Number of recent channel messages scanned for already posted welcome messages.
const LIMIT_CHANNEL_MESSAGES: u8 = 100;

impl<A: DiscordApi> WelcomeService<A> {
    /// Runs one reconciliation pass over the welcome channel.
    ///
    /// Scans the most recent channel messages. Each bot-authored message with an embed whose
    /// fingerprint equals an unclaimed declared message claims it, records its id and is
    /// synchronized right away. Declared messages left unclaimed are then posted and reacted
    /// to with their emoji.
    ///
    /// Running the pass again without external changes posts nothing.
    ///
    /// # Returns
    /// - `Ok(())` - Every declared message is posted and synchronized
    /// - `Err(AppError)` - Fetching history, synchronizing, posting or reacting failed; messages
    ///   handled before the failure keep their recorded ids
    pub async fn run(&mut self) -> Result<(), AppError> {
        let channel_id = self.board.channel_id;

        tracing::info!(
            "Fetching messages from channel {} ('{}')",
            channel_id,
            self.board.channel_name
        );

        let posted = self
            .api
            .list_messages(channel_id, LIMIT_CHANNEL_MESSAGES, None)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Failed to fetch messages from channel {} ('{}'): {}",
                    channel_id,
                    self.board.channel_name,
                    e
                );
            })?;

        let mut claimed = vec![false; self.board.messages.len()];

        for message in &posted {
            if message.author_id != self.bot_id {
                continue;
            }

            let Some(fingerprint) = &message.embed else {
                continue;
            };

            let Some(index) = self
                .board
                .messages
                .iter()
                .enumerate()
                .position(|(index, declared)| {
                    !claimed[index] && declared.fingerprint() == *fingerprint
                })
            else {
                continue;
            };

            claimed[index] = true;
            self.board.messages[index].message_id = Some(message.id);

            let declared = &self.board.messages[index];
            tracing::info!(
                "Welcome message '{}' already posted as {}, updating roles",
                declared.title,
                message.id
            );

            let report = self
                .sync_message(declared, message.id)
                .await
                .inspect_err(|e| {
                    tracing::error!(
                        "Failed to update roles of welcome message '{}': {}",
                        declared.title,
                        e
                    );
                })?;

            tracing::debug!(
                "Welcome message {} synchronized: {} reactors, {} roles granted, {} reactions purged",
                message.id,
                report.members_reacted,
                report.roles_granted,
                report.reactions_purged
            );
        }

        for index in 0..self.board.messages.len() {
            if claimed[index] {
                continue;
            }

            tracing::info!(
                "Welcome message '{}' missing, posting it",
                self.board.messages[index].title
            );

            self.post_message(index).await.inspect_err(|e| {
                tracing::error!(
                    "Failed to post welcome message '{}': {}",
                    self.board.messages[index].title,
                    e
                );
            })?;
        }

        tracing::info!(
            "Welcome messages reconciled in channel '{}'",
            self.board.channel_name
        );

        Ok(())
    }

    /// Posts the declared message at `index` and adds its reaction.
    ///
    /// The message id is recorded as soon as the embed is sent, so a failed reaction still
    /// leaves the board pointing at the posted message.
    async fn post_message(&mut self, index: usize) -> Result<MessageId, AppError> {
        let channel_id = self.board.channel_id;
        let Some(message) = self.board.messages.get(index) else {
            return Err(AppError::InternalError(format!(
                "Welcome message index {} out of range",
                index
            )));
        };
        let WelcomeMessage {
            title,
            description,
            color,
            ..
        } = message;

        let message_id = self
            .api
            .send_embed(channel_id, title, description, *color)
            .await?;

        tracing::info!("Posted welcome message {} in channel {}", message_id, channel_id);

        let emoji = message.emoji_ref();
        if let Some(message) = self.board.messages.get_mut(index) {
            message.message_id = Some(message_id);
        }

        self.api
            .add_reaction(channel_id, message_id, &emoji)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Failed to add reaction {} to message {}: {}",
                    emoji,
                    message_id,
                    e
                );
            })?;

        Ok(message_id)
    }
}
