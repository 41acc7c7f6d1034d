//! Matchmaking configuration constants.
//!
//! Matches are strictly 1v1: the queue pairs the two oldest waiting players
//! per game type. Queue membership has no timeout; a player waits until
//! paired or until they leave.

/// Players per match.
pub const MATCH_SIZE: usize = 2;
