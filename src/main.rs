mod bot;
mod config;
mod data;
mod error;
mod logging;
mod model;
mod scheduler;
mod service;

use crate::{config::Config, error::AppError};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let config = Config::load(&config::config_path())?;
    logging::init(&config.log)?;

    tracing::info!("Starting welcome board for guild '{}'", config.discord.name);

    let client = bot::start::init_bot(&config).await?;

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            return;
        }

        tracing::info!("Shutting down Discord bot");
        shard_manager.shutdown_all().await;
    });

    bot::start::start_bot(client).await
}
