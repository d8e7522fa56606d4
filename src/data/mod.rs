//! Access layer for remote state.
//!
//! The welcome board has no local store: everything it reads or changes lives on Discord.
//! This layer wraps every remote operation behind the `DiscordApi` port so the service
//! layer can be exercised against a recording fake.

pub mod discord;
