//! Discord gateway integration.
//!
//! Builds the serenity client and forwards gateway events to the welcome worker.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild, channel and role data for name resolution
//! - `GUILD_MEMBERS` - Member cache used to look up reactors' roles (privileged intent)
//! - `GUILD_EMOJIS_AND_STICKERS` - Custom emojis for name resolution
//! - `GUILD_MESSAGES` - Channel history of the welcome channel
//! - `GUILD_MESSAGE_REACTIONS` - Reaction add and remove events
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod handler;
pub mod start;
