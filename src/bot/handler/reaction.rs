//! Reaction event handlers.
//!
//! Converts gateway reactions into welcome commands and queues them for the worker.
//! Filtering against the board happens in the worker, which owns it.

use serenity::all::Reaction;

use crate::{
    bot::handler::Handler, model::discord::ReactionEvent,
    service::welcome::worker::WelcomeCommand,
};

/// Handles a reaction added to any message the bot can see.
pub async fn handle_reaction_add(handler: &Handler, reaction: Reaction) {
    if let Some(event) = reaction_event(handler, &reaction) {
        handler.queue.push(WelcomeCommand::ReactionAdded(event));
    }
}

/// Handles a reaction removed from any message the bot can see.
pub async fn handle_reaction_remove(handler: &Handler, reaction: Reaction) {
    if let Some(event) = reaction_event(handler, &reaction) {
        handler.queue.push(WelcomeCommand::ReactionRemoved(event));
    }
}

fn reaction_event(handler: &Handler, reaction: &Reaction) -> Option<ReactionEvent> {
    handler.welcome.as_ref()?;

    let event = ReactionEvent::from_reaction(reaction);
    if event.is_none() {
        tracing::debug!(
            "Ignoring reaction without user on message {}",
            reaction.message_id
        );
    }

    event
}
