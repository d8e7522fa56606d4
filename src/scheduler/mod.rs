//! Cron-driven background jobs.

pub mod welcome_resync;
