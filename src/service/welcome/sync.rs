//! Reaction synchronization for one posted welcome message.

use serenity::all::{MessageId, UserId};

use crate::{
    data::discord::DiscordApi,
    error::AppError,
    model::welcome::{EmojiRef, WelcomeMessage},
    service::welcome::WelcomeService,
};

/// Page size used when listing reactors.
const LIMIT_MESSAGE_REACTIONS: u8 = 100;

/// Outcome of synchronizing one message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Every reactor returned for the message, the bot included.
    pub members_reacted: usize,
    pub roles_granted: usize,
    /// Reactors whose membership lookup failed, in reactor order.
    pub members_not_in_guild: Vec<UserId>,
    pub reactions_purged: usize,
}

impl<A: DiscordApi> WelcomeService<A> {
    /// Lists every user who reacted with `emoji`, following pagination to the end.
    ///
    /// Pages are requested after the last user id seen until an empty page comes back.
    async fn list_all_reactors(
        &self,
        message_id: MessageId,
        emoji: &EmojiRef,
    ) -> Result<Vec<UserId>, AppError> {
        let mut reactors = Vec::new();
        let mut after = None;

        loop {
            let page = self
                .api
                .list_reactors(
                    self.board.channel_id,
                    message_id,
                    emoji,
                    after,
                    LIMIT_MESSAGE_REACTIONS,
                )
                .await?;

            let Some(last) = page.last() else {
                break;
            };

            after = Some(*last);
            reactors.extend(page);
        }

        Ok(reactors)
    }

    /// Synchronizes roles and reactions of a posted welcome message.
    ///
    /// Every reactor other than the bot that is found in the guild and lacks the message's
    /// role is granted it. Reactors that cannot be looked up are collected, and their
    /// reactions are removed when the message's purge policy allows it for the observed
    /// counts. Removals are independent: a failed one is logged and the others proceed.
    ///
    /// # Arguments
    /// - `message` - Resolved welcome message
    /// - `message_id` - Posted message carrying it
    ///
    /// # Returns
    /// - `Ok(SyncReport)` - All reactors processed
    /// - `Err(AppError)` - Listing reactors or granting a role failed
    pub async fn sync_message(
        &self,
        message: &WelcomeMessage,
        message_id: MessageId,
    ) -> Result<SyncReport, AppError> {
        let emoji = message.emoji_ref();

        tracing::info!(
            "Fetching reactions {} of message {} in channel '{}'",
            emoji,
            message_id,
            self.board.channel_name
        );

        let reactors = self
            .list_all_reactors(message_id, &emoji)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    "Failed to fetch reactions {} of message {}: {}",
                    emoji,
                    message_id,
                    e
                );
            })?;

        let mut report = SyncReport {
            members_reacted: reactors.len(),
            ..SyncReport::default()
        };

        for user_id in reactors {
            if user_id == self.bot_id {
                continue;
            }

            let roles = match self.api.member_roles(self.board.guild_id, user_id).await {
                Ok(roles) => roles,
                Err(e) => {
                    tracing::debug!("Reactor {} not found in guild: {}", user_id, e);
                    report.members_not_in_guild.push(user_id);
                    continue;
                }
            };

            if roles.contains(&message.role_id) {
                continue;
            }

            tracing::info!(
                "Adding role {} ('{}') to user {}",
                message.role_id,
                message.role,
                user_id
            );

            self.api
                .grant_role(self.board.guild_id, user_id, message.role_id)
                .await
                .inspect_err(|e| {
                    tracing::error!(
                        "Failed to add role {} ('{}') to user {}: {}",
                        message.role_id,
                        message.role,
                        user_id,
                        e
                    );
                })?;

            report.roles_granted += 1;
        }

        if report.members_not_in_guild.is_empty() {
            return Ok(report);
        }

        tracing::info!(
            "{} of {} reactors of message {} not found in guild",
            report.members_not_in_guild.len(),
            report.members_reacted,
            message_id
        );

        if !message
            .purge
            .allows(report.members_reacted, report.members_not_in_guild.len())
        {
            return Ok(report);
        }

        tracing::info!("Purging reactions of message {}", message_id);

        for user_id in &report.members_not_in_guild {
            match self
                .api
                .remove_reaction(self.board.channel_id, message_id, &emoji, *user_id)
                .await
            {
                Ok(()) => {
                    report.reactions_purged += 1;
                    tracing::info!(
                        "Removed reaction {} of user {} from message {}",
                        emoji,
                        user_id,
                        message_id
                    );
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to remove reaction {} of user {} from message {}: {}",
                        emoji,
                        user_id,
                        message_id,
                        e
                    );
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::discord::fake::{Call, FakeDiscord, Failure},
        model::welcome::PurgePolicy,
        service::welcome::test::{board, welcome_message, BOT_ID, ROLE_ID},
    };
    use serenity::all::RoleId;
    use std::sync::Arc;

    const MESSAGE_ID: u64 = 500;

    fn posted_message(purge: PurgePolicy) -> WelcomeMessage {
        WelcomeMessage {
            purge,
            message_id: Some(MessageId::new(MESSAGE_ID)),
            ..welcome_message("Rules")
        }
    }

    fn purge(enabled: bool, threshold: usize, below: usize) -> PurgePolicy {
        PurgePolicy {
            enabled,
            threshold_members_reacted: threshold,
            below_count_members_not_in_guild: below,
        }
    }

    async fn sync(fake: FakeDiscord, message: WelcomeMessage) -> (Arc<FakeDiscord>, SyncReport) {
        let fake = Arc::new(fake);
        let service = WelcomeService::new(fake.clone(), board(vec![message.clone()]));

        let report = service
            .sync_message(&message, MessageId::new(MESSAGE_ID))
            .await
            .unwrap();

        (fake, report)
    }

    /// Tests granting the role to reactors lacking it.
    ///
    /// Verifies that the bot's own reaction is skipped and members that already hold the
    /// role trigger no redundant grant.
    ///
    /// Expected: Ok with a single grant for the member without the role
    #[tokio::test]
    async fn grants_missing_roles() {
        let fake = FakeDiscord::new(BOT_ID)
            .with_reactors(MESSAGE_ID, &[BOT_ID, 7, 8])
            .with_member(7, &[])
            .with_member(8, &[ROLE_ID]);

        let (fake, report) = sync(fake, posted_message(PurgePolicy::default())).await;

        assert_eq!(fake.granted(), vec![(UserId::new(7), RoleId::new(ROLE_ID))]);
        assert!(fake.member_has_role(7, ROLE_ID));
        assert_eq!(report.members_reacted, 3);
        assert_eq!(report.roles_granted, 1);
        assert!(report.members_not_in_guild.is_empty());
        assert!(!fake
            .calls()
            .contains(&Call::MemberRoles {
                user_id: UserId::new(BOT_ID)
            }));
    }

    /// Tests following reactor pagination across several pages.
    ///
    /// Expected: Ok with every reactor granted and the cursor advanced to the last id of
    /// each page until an empty page
    #[tokio::test]
    async fn paginates_all_reactors() {
        let reactors: Vec<u64> = (100..350).collect();
        let mut fake = FakeDiscord::new(BOT_ID).with_reactors(MESSAGE_ID, &reactors);
        for user_id in &reactors {
            fake = fake.with_member(*user_id, &[]);
        }

        let (fake, report) = sync(fake, posted_message(PurgePolicy::default())).await;

        assert_eq!(report.members_reacted, 250);
        assert_eq!(report.roles_granted, 250);

        let cursors: Vec<Option<UserId>> = fake
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::ListReactors { after, .. } => Some(after),
                _ => None,
            })
            .collect();
        assert_eq!(
            cursors,
            vec![
                None,
                Some(UserId::new(199)),
                Some(UserId::new(299)),
                Some(UserId::new(349)),
            ]
        );
    }

    /// Tests purging the reaction of a user not found in the guild.
    ///
    /// Expected: Ok with the stale reaction removed
    #[tokio::test]
    async fn purges_reactions_of_users_not_in_guild() {
        let fake = FakeDiscord::new(BOT_ID).with_reactors(MESSAGE_ID, &[7]);

        let (fake, report) = sync(fake, posted_message(purge(true, 1, 5))).await;

        assert_eq!(report.members_not_in_guild, vec![UserId::new(7)]);
        assert_eq!(report.reactions_purged, 1);
        assert_eq!(fake.removed_reactions(), vec![UserId::new(7)]);
        assert!(fake.reactors(MESSAGE_ID).is_empty());
        assert!(fake.granted().is_empty());
    }

    /// Tests that falsifying any purge condition prevents every removal.
    ///
    /// Expected: Ok with zero removals for disabled purge, too few reactors, and too many
    /// users not in guild
    #[tokio::test]
    async fn purge_requires_every_condition() {
        for policy in [purge(false, 1, 5), purge(true, 5, 5), purge(true, 1, 1)] {
            let fake = FakeDiscord::new(BOT_ID)
                .with_reactors(MESSAGE_ID, &[BOT_ID, 7, 8, 9])
                .with_member(7, &[]);

            let (fake, report) = sync(fake, posted_message(policy)).await;

            assert_eq!(
                report.members_not_in_guild,
                vec![UserId::new(8), UserId::new(9)],
                "policy {:?}",
                policy
            );
            assert!(fake.removed_reactions().is_empty(), "policy {:?}", policy);
            assert_eq!(report.reactions_purged, 0);
        }
    }

    /// Tests that the purge threshold counts the bot's own reaction.
    ///
    /// Expected: Ok with the stale reaction removed at exactly the threshold
    #[tokio::test]
    async fn purge_threshold_includes_bot_reaction() {
        let fake = FakeDiscord::new(BOT_ID).with_reactors(MESSAGE_ID, &[BOT_ID, 7]);

        let (fake, report) = sync(fake, posted_message(purge(true, 2, 1))).await;

        assert_eq!(report.members_reacted, 2);
        assert_eq!(fake.removed_reactions(), vec![UserId::new(7)]);
    }

    /// Tests that a failed removal does not stop the remaining removals.
    ///
    /// Expected: Ok with both removals attempted and one counted as purged
    #[tokio::test]
    async fn purge_failures_are_independent() {
        let fake = FakeDiscord::new(BOT_ID)
            .with_reactors(MESSAGE_ID, &[7, 8])
            .failing(Failure::RemoveReaction(UserId::new(7)));

        let (fake, report) = sync(fake, posted_message(purge(true, 1, 5))).await;

        assert_eq!(
            fake.removed_reactions(),
            vec![UserId::new(7), UserId::new(8)]
        );
        assert_eq!(report.reactions_purged, 1);
        assert_eq!(fake.reactors(MESSAGE_ID), vec![UserId::new(7)]);
    }

    /// Tests that a failed grant aborts the synchronization.
    ///
    /// Expected: Err, later reactors untouched
    #[tokio::test]
    async fn grant_failure_aborts_sync() {
        let fake = Arc::new(
            FakeDiscord::new(BOT_ID)
                .with_reactors(MESSAGE_ID, &[7, 8])
                .with_member(7, &[])
                .with_member(8, &[])
                .failing(Failure::GrantRole(UserId::new(7))),
        );
        let message = posted_message(PurgePolicy::default());
        let service = WelcomeService::new(fake.clone(), board(vec![message.clone()]));

        let result = service
            .sync_message(&message, MessageId::new(MESSAGE_ID))
            .await;

        assert!(result.is_err());
        assert_eq!(fake.granted(), vec![(UserId::new(7), RoleId::new(ROLE_ID))]);
        assert!(!fake.member_has_role(8, ROLE_ID));
    }

    /// Tests that a failed reactor page aborts the synchronization.
    ///
    /// Expected: Err with no role lookups
    #[tokio::test]
    async fn reactor_listing_failure_aborts_sync() {
        let fake = Arc::new(
            FakeDiscord::new(BOT_ID)
                .with_reactors(MESSAGE_ID, &[7])
                .with_member(7, &[])
                .failing(Failure::ListReactors),
        );
        let message = posted_message(PurgePolicy::default());
        let service = WelcomeService::new(fake.clone(), board(vec![message.clone()]));

        let result = service
            .sync_message(&message, MessageId::new(MESSAGE_ID))
            .await;

        assert!(result.is_err());
        assert!(fake.granted().is_empty());
    }
}
