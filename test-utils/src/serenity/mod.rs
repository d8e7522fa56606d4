//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating mock Serenity structs (Guild, Role,
//! Emoji, Channel, Member, Message, Reaction) for testing purposes. These factories create valid
//! Serenity objects by deserializing JSON, simulating what Discord's API would return.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_message, TestGuildBuilder};
//!
//! #[test]
//! fn test_snapshot() {
//!     let guild = TestGuildBuilder::new(1000, "My Guild")
//!         .text_channel(11, "welcome")
//!         .role(20, "Verified")
//!         .build();
//!
//!     let message = create_test_message(500, 11, 7, &[("Rules", "", 0)]);
//!
//!     // Use in your tests...
//! }
//! ```

pub mod channel;
pub mod emoji;
pub mod guild;
pub mod member;
pub mod message;
pub mod reaction;
pub mod role;

pub use channel::create_test_channel;
pub use emoji::create_test_emoji;
pub use guild::{create_test_guild, TestGuildBuilder};
pub use member::create_test_member;
pub use message::{create_test_message, create_test_user};
pub use reaction::create_test_reaction;
pub use role::create_test_role;
