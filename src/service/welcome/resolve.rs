//! Configuration resolution.
//!
//! Binds the guild, channel, role and emoji names of a declared welcome configuration to
//! Discord identifiers taken from guild snapshots. Resolution is pure: it reads the snapshots
//! and the configuration and builds a new `WelcomeBoard`.

use serenity::all::{EmojiId, RoleId};

use crate::{
    error::welcome::WelcomeError,
    model::{
        discord::GuildSnapshot,
        welcome::{WelcomeBoard, WelcomeConfig, WelcomeMessage},
    },
};

/// Validates a declared configuration before anything is looked up.
///
/// Stops at the first violation.
///
/// # Returns
/// - `Ok(())` - Channel and messages are declared and every message is complete
/// - `Err(WelcomeError)` - Empty channel, no messages, a message without title and
///   description, emoji or role, or two messages with the same fingerprint
pub fn validate(config: &WelcomeConfig) -> Result<(), WelcomeError> {
    if config.channel.is_empty() {
        return Err(WelcomeError::EmptyChannel);
    }

    if config.messages.is_empty() {
        return Err(WelcomeError::EmptyMessages);
    }

    for (index, message) in config.messages.iter().enumerate() {
        if message.title.is_empty() && message.description.is_empty() {
            return Err(WelcomeError::EmptyTitleAndDescription { index });
        }

        if message.emoji.is_empty() {
            return Err(WelcomeError::EmptyEmoji { index });
        }

        if message.role.is_empty() {
            return Err(WelcomeError::EmptyRole { index });
        }

        let fingerprint = message.fingerprint();
        if let Some(first_index) = config.messages[..index]
            .iter()
            .position(|previous| previous.fingerprint() == fingerprint)
        {
            return Err(WelcomeError::DuplicateFingerprint { index, first_index });
        }
    }

    Ok(())
}

/// Replaces every `shorthand` in `text` with `rich`, leaving emojis already written in
/// `<:name:id>` or `<a:name:id>` form untouched.
fn expand_shorthand(text: &str, shorthand: &str, rich: &str) -> String {
    let mut expanded = String::with_capacity(text.len());
    let mut copied = 0;

    for (start, _) in text.match_indices(shorthand) {
        let before = &text[..start];
        if before.ends_with('<') || before.ends_with("<a") {
            continue;
        }

        expanded.push_str(&text[copied..start]);
        expanded.push_str(rich);
        copied = start + shorthand.len();
    }

    expanded.push_str(&text[copied..]);
    expanded
}

/// Message being resolved, identifiers still optional.
struct Pending {
    title: String,
    description: String,
    role_id: Option<RoleId>,
    emoji_id: Option<EmojiId>,
}

/// Resolves a welcome configuration against the guilds the bot can see.
///
/// The first guild named `guild_name` is used, and the first channel in it named after the
/// configured channel. Every role and emoji of that guild is matched against every message,
/// so one role or emoji may back several messages. Each `:emoji:` shorthand found in a title
/// or description is rewritten to the `<:emoji:id>` form Discord renders, and the rewritten
/// messages must still have distinct fingerprints.
///
/// # Arguments
/// - `config` - Declared welcome configuration
/// - `guilds` - Snapshots of the guilds available to the bot
/// - `guild_name` - Name of the guild to manage
///
/// # Returns
/// - `Ok(WelcomeBoard)` - Every message carries a role id and an emoji id
/// - `Err(WelcomeError)` - Invalid configuration, messages identical once rewritten, or a
///   guild, channel, emoji or role that does not exist
pub fn resolve(
    config: &WelcomeConfig,
    guilds: &[GuildSnapshot],
    guild_name: &str,
) -> Result<WelcomeBoard, WelcomeError> {
    validate(config)?;

    let guild = guilds
        .iter()
        .find(|guild| guild.name == guild_name)
        .ok_or_else(|| WelcomeError::GuildNotFound {
            guild: guild_name.to_string(),
        })?;

    tracing::info!("Set guild id {} for guild '{}'", guild.id, guild.name);

    let channel = guild
        .channels
        .iter()
        .find(|channel| channel.name == config.channel)
        .ok_or_else(|| WelcomeError::ChannelNotFound {
            guild: guild.name.clone(),
            channel: config.channel.clone(),
        })?;

    tracing::info!("Set channel id {} for channel '{}'", channel.id, channel.name);

    let mut pending: Vec<Pending> = config
        .messages
        .iter()
        .map(|message| Pending {
            title: message.title.clone(),
            description: message.description.clone(),
            role_id: None,
            emoji_id: None,
        })
        .collect();

    for role in &guild.roles {
        for (declared, message) in config.messages.iter().zip(pending.iter_mut()) {
            if declared.role != role.name {
                continue;
            }

            tracing::debug!("Set role id {} for role '{}'", role.id, role.name);
            message.role_id = Some(role.id);
        }
    }

    for emoji in &guild.emojis {
        let shorthand = format!(":{}:", emoji.name);
        let rich = format!("<:{}:{}>", emoji.name, emoji.id);

        for (declared, message) in config.messages.iter().zip(pending.iter_mut()) {
            message.title = expand_shorthand(&message.title, &shorthand, &rich);
            message.description = expand_shorthand(&message.description, &shorthand, &rich);

            if declared.emoji != emoji.name {
                continue;
            }

            tracing::debug!("Set emoji id {} for emoji '{}'", emoji.id, emoji.name);
            message.emoji_id = Some(emoji.id);
        }
    }

    let messages = config
        .messages
        .iter()
        .zip(pending)
        .enumerate()
        .map(|(index, (declared, message))| {
            let emoji_id = message.emoji_id.ok_or_else(|| WelcomeError::EmojiNotFound {
                index,
                emoji: declared.emoji.clone(),
            })?;
            let role_id = message.role_id.ok_or_else(|| WelcomeError::RoleNotFound {
                index,
                role: declared.role.clone(),
            })?;

            Ok(WelcomeMessage {
                title: message.title,
                description: message.description,
                color: declared.color,
                role: declared.role.clone(),
                role_id,
                emoji: declared.emoji.clone(),
                emoji_id,
                purge: declared.purge_policy(),
                message_id: None,
            })
        })
        .collect::<Result<Vec<_>, WelcomeError>>()?;

    for (index, message) in messages.iter().enumerate() {
        let fingerprint = message.fingerprint();
        if let Some(first_index) = messages[..index]
            .iter()
            .position(|previous| previous.fingerprint() == fingerprint)
        {
            return Err(WelcomeError::DuplicateFingerprint { index, first_index });
        }
    }

    Ok(WelcomeBoard {
        guild_id: guild.id,
        guild_name: guild.name.clone(),
        channel_id: channel.id,
        channel_name: channel.name.clone(),
        messages,
    })
}
