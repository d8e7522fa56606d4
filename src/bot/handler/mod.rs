use serenity::all::{Context, EventHandler, GuildId, Reaction, Ready};
use serenity::async_trait;
use tokio::sync::{mpsc::Receiver, Mutex};

use crate::{
    model::welcome::WelcomeConfig,
    service::welcome::worker::{WelcomeCommand, WelcomeQueue},
};

pub mod cache_ready;
pub mod reaction;
pub mod ready;

/// Discord bot event handler
pub struct Handler {
    /// Name of the guild the bot manages.
    pub guild_name: String,
    /// Welcome module configuration, `None` when the module is disabled.
    pub welcome: Option<WelcomeConfig>,
    pub queue: WelcomeQueue,
    /// Receiving end of `queue`, taken by the worker once the board is resolved.
    pub receiver: Mutex<Option<Receiver<WelcomeCommand>>>,
}

impl Handler {
    pub fn new(guild_name: String, welcome: Option<WelcomeConfig>) -> Self {
        let (queue, receiver) = WelcomeQueue::channel();

        Self {
            guild_name,
            welcome,
            queue,
            receiver: Mutex::new(Some(receiver)),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(ctx, ready).await;
    }

    /// Called once every guild of the ready payload is in the cache
    async fn cache_ready(&self, ctx: Context, guilds: Vec<GuildId>) {
        cache_ready::handle_cache_ready(self, ctx, guilds).await;
    }

    /// Called when a reaction is added to a message
    async fn reaction_add(&self, _ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_add(self, reaction).await;
    }

    /// Called when a reaction is removed from a message
    async fn reaction_remove(&self, _ctx: Context, reaction: Reaction) {
        reaction::handle_reaction_remove(self, reaction).await;
    }
}
