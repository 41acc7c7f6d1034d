//! Main configuration module.
//!
//! Re-exports submodules for match pacing, matchmaking, and anti-spam settings.

pub mod anti_spam;
pub mod game;
pub mod matchmaking;
