//! Matchmaking module: per-game-type FIFO queues and pairing into matches.

pub mod messages;
pub mod queue;
pub mod server;
pub mod types;
