//! Welcome Board Test Utils
//!
//! Serenity model factories for unit tests. Serenity models are mostly non-exhaustive, so
//! each factory deserializes a minimal JSON payload the way the gateway would deliver it.
//!
//! ```rust,ignore
//! use test_utils::serenity::TestGuildBuilder;
//!
//! let guild = TestGuildBuilder::new(1000, "My Guild")
//!     .text_channel(11, "welcome")
//!     .role(21, "Verified")
//!     .emoji(40, "check")
//!     .build();
//! ```

pub mod serenity;
