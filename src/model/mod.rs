//! Domain models for the welcome board.
//!
//! - `welcome` - declared configuration and the resolved board
//! - `discord` - read-only views over serenity models (snapshots, messages, reactions)

pub mod discord;
pub mod welcome;
