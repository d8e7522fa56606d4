//! Welcome board service.
//!
//! Keeps a declared set of role-granting embeds consistent with a Discord channel:
//!
//! - `resolve` - validates the configuration and binds names to identifiers
//! - `reconcile` - finds already posted embeds by fingerprint and posts the missing ones
//! - `sync` - grants roles to reactors and purges reactions of users no longer found
//! - `events` - grants or revokes roles for live reaction notifications
//! - `worker` - bounded command queue owning the board for the lifetime of the bot
//!
//! Nothing is persisted: message ids are rediscovered from channel history on every
//! reconciliation pass.

pub mod events;
pub mod reconcile;
pub mod resolve;
pub mod sync;
pub mod worker;

use serenity::all::UserId;
use std::sync::Arc;

use crate::{data::discord::DiscordApi, model::welcome::WelcomeBoard};

/// Service owning a resolved welcome board.
///
/// Identity fields of the board (message ids) are only written by `run`, which takes
/// `&mut self`; the reaction handlers only read the board.
pub struct WelcomeService<A> {
    api: Arc<A>,
    board: WelcomeBoard,
    bot_id: UserId,
}

impl<A: DiscordApi> WelcomeService<A> {
    /// Creates a new WelcomeService for a resolved board.
    ///
    /// # Arguments
    /// - `api` - Discord port used for every remote call
    /// - `board` - Board produced by `resolve::resolve`
    pub fn new(api: Arc<A>, board: WelcomeBoard) -> Self {
        let bot_id = api.current_user_id();
        Self { api, board, bot_id }
    }

    pub fn board(&self) -> &WelcomeBoard {
        &self.board
    }
}

#[cfg(test)]
pub(crate) mod test {
    use serenity::all::{ChannelId, EmojiId, GuildId, RoleId};

    use crate::model::welcome::{PurgePolicy, WelcomeBoard, WelcomeMessage};

    pub const BOT_ID: u64 = 1;
    pub const GUILD_ID: u64 = 1000;
    pub const CHANNEL_ID: u64 = 11;
    pub const ROLE_ID: u64 = 21;
    pub const EMOJI_ID: u64 = 40;

    pub fn welcome_message(title: &str) -> WelcomeMessage {
        WelcomeMessage {
            title: title.to_string(),
            description: String::new(),
            color: 0,
            role: "Verified".to_string(),
            role_id: RoleId::new(ROLE_ID),
            emoji: "check".to_string(),
            emoji_id: EmojiId::new(EMOJI_ID),
            purge: PurgePolicy::default(),
            message_id: None,
        }
    }

    pub fn board(messages: Vec<WelcomeMessage>) -> WelcomeBoard {
        WelcomeBoard {
            guild_id: GuildId::new(GUILD_ID),
            guild_name: "My Guild".to_string(),
            channel_id: ChannelId::new(CHANNEL_ID),
            channel_name: "welcome".to_string(),
            messages,
        }
    }
}
