//! Business logic of the welcome board.
//!
//! Services coordinate between the declared configuration (model layer) and the Discord
//! port (data layer). They never call serenity directly.

pub mod welcome;
