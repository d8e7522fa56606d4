//! Recording in-memory `DiscordApi` for tests.
//!
//! Keeps channel messages, reactors and cached member roles in memory and applies every
//! mutation to that state, so a second reconciliation pass sees what the first one did.
//! Every call is recorded in order and individual operations can be made to fail.

use serenity::all::{ChannelId, GuildId, MessageId, RoleId, UserId};
use serenity::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Mutex;

use crate::{
    data::discord::DiscordApi,
    error::AppError,
    model::{
        discord::PostedMessage,
        welcome::{EmojiRef, Fingerprint},
    },
};

/// First identifier handed out to messages posted through the fake.
const FIRST_POSTED_MESSAGE_ID: u64 = 9000;

/// A call made against the fake, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListMessages {
        channel_id: ChannelId,
        limit: u8,
    },
    SendEmbed {
        channel_id: ChannelId,
        fingerprint: Fingerprint,
    },
    AddReaction {
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: String,
    },
    RemoveReaction {
        channel_id: ChannelId,
        message_id: MessageId,
        user_id: UserId,
    },
    ListReactors {
        message_id: MessageId,
        after: Option<UserId>,
    },
    MemberRoles {
        user_id: UserId,
    },
    GrantRole {
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    },
    RevokeRole {
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    },
}

/// Operation the fake should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Failure {
    ListMessages,
    SendEmbed,
    AddReaction,
    ListReactors,
    GrantRole(UserId),
    RevokeRole(UserId),
    RemoveReaction(UserId),
}

#[derive(Default)]
struct FakeState {
    /// Channel messages, newest first.
    messages: HashMap<ChannelId, Vec<PostedMessage>>,
    reactors: HashMap<MessageId, BTreeSet<UserId>>,
    members: HashMap<UserId, Vec<RoleId>>,
    failures: HashSet<Failure>,
    calls: Vec<Call>,
    next_message_id: u64,
}

pub struct FakeDiscord {
    bot_id: UserId,
    state: Mutex<FakeState>,
}

fn fake_failure() -> AppError {
    AppError::from(serenity::Error::Other("fake discord failure"))
}

impl FakeDiscord {
    pub fn new(bot_id: u64) -> Self {
        Self {
            bot_id: UserId::new(bot_id),
            state: Mutex::new(FakeState {
                next_message_id: FIRST_POSTED_MESSAGE_ID,
                ..FakeState::default()
            }),
        }
    }

    fn state(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    /// Adds an existing message on top of the channel history.
    pub fn with_message(
        self,
        channel_id: u64,
        message_id: u64,
        author_id: u64,
        embed: Option<Fingerprint>,
    ) -> Self {
        self.state()
            .messages
            .entry(ChannelId::new(channel_id))
            .or_default()
            .insert(
                0,
                PostedMessage {
                    id: MessageId::new(message_id),
                    author_id: UserId::new(author_id),
                    embed,
                },
            );
        self
    }

    pub fn with_reactors(self, message_id: u64, user_ids: &[u64]) -> Self {
        self.state()
            .reactors
            .entry(MessageId::new(message_id))
            .or_default()
            .extend(user_ids.iter().copied().map(UserId::new));
        self
    }

    /// Adds a cached member holding the given roles.
    pub fn with_member(self, user_id: u64, role_ids: &[u64]) -> Self {
        self.state().members.insert(
            UserId::new(user_id),
            role_ids.iter().copied().map(RoleId::new).collect(),
        );
        self
    }

    pub fn failing(self, failure: Failure) -> Self {
        self.state().failures.insert(failure);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    pub fn sent_embeds(&self) -> Vec<Fingerprint> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::SendEmbed { fingerprint, .. } => Some(fingerprint),
                _ => None,
            })
            .collect()
    }

    pub fn granted(&self) -> Vec<(UserId, RoleId)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::GrantRole {
                    user_id, role_id, ..
                } => Some((user_id, role_id)),
                _ => None,
            })
            .collect()
    }

    pub fn revoked(&self) -> Vec<(UserId, RoleId)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::RevokeRole {
                    user_id, role_id, ..
                } => Some((user_id, role_id)),
                _ => None,
            })
            .collect()
    }

    pub fn removed_reactions(&self) -> Vec<UserId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::RemoveReaction { user_id, .. } => Some(user_id),
                _ => None,
            })
            .collect()
    }

    pub fn reactors(&self, message_id: u64) -> Vec<UserId> {
        self.state()
            .reactors
            .get(&MessageId::new(message_id))
            .map(|reactors| reactors.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn member_has_role(&self, user_id: u64, role_id: u64) -> bool {
        self.state()
            .members
            .get(&UserId::new(user_id))
            .is_some_and(|roles| roles.contains(&RoleId::new(role_id)))
    }

    fn record(&self, call: Call, failure: Failure) -> Result<(), AppError> {
        let mut state = self.state();
        state.calls.push(call);
        if state.failures.contains(&failure) {
            return Err(fake_failure());
        }
        Ok(())
    }
}

#[async_trait]
impl DiscordApi for FakeDiscord {
    fn current_user_id(&self) -> UserId {
        self.bot_id
    }

    async fn list_messages(
        &self,
        channel_id: ChannelId,
        limit: u8,
        before: Option<MessageId>,
    ) -> Result<Vec<PostedMessage>, AppError> {
        self.record(Call::ListMessages { channel_id, limit }, Failure::ListMessages)?;

        let state = self.state();
        Ok(state
            .messages
            .get(&channel_id)
            .map(|messages| {
                messages
                    .iter()
                    .filter(|message| before.map_or(true, |before| message.id < before))
                    .take(limit as usize)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn send_embed(
        &self,
        channel_id: ChannelId,
        title: &str,
        description: &str,
        color: u32,
    ) -> Result<MessageId, AppError> {
        let fingerprint = Fingerprint::new(title, description, color);
        self.record(
            Call::SendEmbed {
                channel_id,
                fingerprint: fingerprint.clone(),
            },
            Failure::SendEmbed,
        )?;

        let mut state = self.state();
        let message_id = MessageId::new(state.next_message_id);
        state.next_message_id += 1;
        state.messages.entry(channel_id).or_default().insert(
            0,
            PostedMessage {
                id: message_id,
                author_id: self.bot_id,
                embed: Some(fingerprint),
            },
        );

        Ok(message_id)
    }

    async fn add_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        emoji: &EmojiRef,
    ) -> Result<(), AppError> {
        self.record(
            Call::AddReaction {
                channel_id,
                message_id,
                emoji: emoji.to_string(),
            },
            Failure::AddReaction,
        )?;

        self.state()
            .reactors
            .entry(message_id)
            .or_default()
            .insert(self.bot_id);

        Ok(())
    }

    async fn remove_reaction(
        &self,
        channel_id: ChannelId,
        message_id: MessageId,
        _emoji: &EmojiRef,
        user_id: UserId,
    ) -> Result<(), AppError> {
        self.record(
            Call::RemoveReaction {
                channel_id,
                message_id,
                user_id,
            },
            Failure::RemoveReaction(user_id),
        )?;

        if let Some(reactors) = self.state().reactors.get_mut(&message_id) {
            reactors.remove(&user_id);
        }

        Ok(())
    }

    async fn list_reactors(
        &self,
        _channel_id: ChannelId,
        message_id: MessageId,
        _emoji: &EmojiRef,
        after: Option<UserId>,
        limit: u8,
    ) -> Result<Vec<UserId>, AppError> {
        self.record(Call::ListReactors { message_id, after }, Failure::ListReactors)?;

        let state = self.state();
        Ok(state
            .reactors
            .get(&message_id)
            .map(|reactors| {
                reactors
                    .iter()
                    .filter(|user_id| after.map_or(true, |after| **user_id > after))
                    .take(limit as usize)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn member_roles(
        &self,
        _guild_id: GuildId,
        user_id: UserId,
    ) -> Result<Vec<RoleId>, AppError> {
        let mut state = self.state();
        state.calls.push(Call::MemberRoles { user_id });

        state
            .members
            .get(&user_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Member {} not in cache", user_id)))
    }

    async fn grant_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), AppError> {
        self.record(
            Call::GrantRole {
                guild_id,
                user_id,
                role_id,
            },
            Failure::GrantRole(user_id),
        )?;

        if let Some(roles) = self.state().members.get_mut(&user_id) {
            if !roles.contains(&role_id) {
                roles.push(role_id);
            }
        }

        Ok(())
    }

    async fn revoke_role(
        &self,
        guild_id: GuildId,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<(), AppError> {
        self.record(
            Call::RevokeRole {
                guild_id,
                user_id,
                role_id,
            },
            Failure::RevokeRole(user_id),
        )?;

        if let Some(roles) = self.state().members.get_mut(&user_id) {
            roles.retain(|role| *role != role_id);
        }

        Ok(())
    }
}
