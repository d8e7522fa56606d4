//! Single task owning the welcome board.
//!
//! Gateway handlers and the resync scheduler never touch the board directly. They push
//! commands onto a bounded queue which the worker drains one at a time, after its initial
//! reconciliation pass. Reaction events that arrive before the pass completes wait in the
//! queue and therefore see the message ids it discovered.

use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender};

use crate::{
    data::discord::DiscordApi, model::discord::ReactionEvent, service::welcome::WelcomeService,
};

/// Maximum number of commands waiting for the worker.
pub const WELCOME_QUEUE_CAPACITY: usize = 256;

/// Work item handled by the welcome worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WelcomeCommand {
    ReactionAdded(ReactionEvent),
    ReactionRemoved(ReactionEvent),
    /// Run a full reconciliation pass.
    Reconcile,
}

/// Sending half of the welcome command queue.
#[derive(Debug, Clone)]
pub struct WelcomeQueue {
    sender: Sender<WelcomeCommand>,
}

impl WelcomeQueue {
    /// Creates the queue and the receiver the worker drains.
    pub fn channel() -> (Self, Receiver<WelcomeCommand>) {
        let (sender, receiver) = mpsc::channel(WELCOME_QUEUE_CAPACITY);
        (Self { sender }, receiver)
    }

    /// Enqueues a command without waiting.
    ///
    /// # Returns
    /// - `true` - Command queued
    /// - `false` - Queue full or worker gone, command dropped
    pub fn push(&self, command: WelcomeCommand) -> bool {
        match self.sender.try_send(command) {
            Ok(()) => true,
            Err(TrySendError::Full(command)) => {
                tracing::warn!("Welcome queue full, dropping {:?}", command);
                false
            }
            Err(TrySendError::Closed(command)) => {
                tracing::debug!("Welcome worker stopped, dropping {:?}", command);
                false
            }
        }
    }
}

/// Runs the welcome worker until every queue sender is dropped.
///
/// Starts with a reconciliation pass. A failed pass is logged and the worker keeps serving
/// reaction events with whatever message ids were recorded.
pub async fn run_worker<A: DiscordApi>(
    mut service: WelcomeService<A>,
    mut receiver: Receiver<WelcomeCommand>,
) -> WelcomeService<A> {
    tracing::info!(
        "Welcome worker started for channel '{}' in guild '{}'",
        service.board().channel_name,
        service.board().guild_name
    );

    reconcile(&mut service).await;

    while let Some(command) = receiver.recv().await {
        match command {
            WelcomeCommand::ReactionAdded(event) => {
                let outcome = service.on_reaction_add(&event).await;
                tracing::debug!(
                    "Reaction added on message {} by user {}: {:?}",
                    event.message_id,
                    event.user_id,
                    outcome
                );
            }
            WelcomeCommand::ReactionRemoved(event) => {
                let outcome = service.on_reaction_remove(&event).await;
                tracing::debug!(
                    "Reaction removed on message {} by user {}: {:?}",
                    event.message_id,
                    event.user_id,
                    outcome
                );
            }
            WelcomeCommand::Reconcile => reconcile(&mut service).await,
        }
    }

    tracing::info!("Welcome worker stopped");

    service
}

async fn reconcile<A: DiscordApi>(service: &mut WelcomeService<A>) {
    if let Err(e) = service.run().await {
        tracing::error!("Welcome reconciliation failed: {}", e);
    }
}
