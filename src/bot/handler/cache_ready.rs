//! Cache ready handler bootstrapping the welcome board.
//!
//! Fired once the cache holds every guild of the ready payload. The first time, the
//! welcome configuration is resolved against the cached guilds and the worker is spawned
//! with the resulting board. Later calls (after a reconnect) queue a reconciliation pass
//! instead.

use serenity::all::{Context, GuildId};
use std::sync::Arc;

use crate::{
    bot::handler::Handler,
    data::discord::SerenityDiscordApi,
    model::discord::GuildSnapshot,
    scheduler::welcome_resync,
    service::welcome::{
        resolve::resolve,
        worker::{run_worker, WelcomeCommand},
        WelcomeService,
    },
};

/// Handles the cache ready event.
///
/// A resolution failure is logged and leaves the welcome module disabled; the bot keeps
/// running.
///
/// # Arguments
/// - `handler` - Event handler holding the welcome configuration and queue
/// - `ctx` - Discord context with the populated cache
/// - `guilds` - Guilds available to the bot
pub async fn handle_cache_ready(handler: &Handler, ctx: Context, guilds: Vec<GuildId>) {
    let Some(config) = &handler.welcome else {
        tracing::info!("Welcome module not configured");
        return;
    };

    let Some(receiver) = handler.receiver.lock().await.take() else {
        tracing::debug!("Cache ready again, queueing welcome reconciliation");
        handler.queue.push(WelcomeCommand::Reconcile);
        return;
    };

    let snapshots: Vec<GuildSnapshot> = guilds
        .iter()
        .filter_map(|guild_id| {
            ctx.cache
                .guild(*guild_id)
                .map(|guild| GuildSnapshot::from_guild(&guild))
        })
        .collect();

    tracing::debug!(
        "Cache ready with {} of {} guilds",
        snapshots.len(),
        guilds.len()
    );

    let board = match resolve(config, &snapshots, &handler.guild_name) {
        Ok(board) => board,
        Err(e) => {
            tracing::error!("Welcome module disabled: {}", e);
            return;
        }
    };

    let api = Arc::new(SerenityDiscordApi::new(ctx.http.clone(), ctx.cache.clone()));
    let service = WelcomeService::new(api, board);

    tokio::spawn(async move {
        run_worker(service, receiver).await;
    });

    if let Some(schedule) = &config.resync_schedule {
        if let Err(e) = welcome_resync::start_scheduler(schedule, handler.queue.clone()).await {
            tracing::error!("Welcome resync scheduler error: {}", e);
        }
    }
}
