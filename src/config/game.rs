//! Match pacing and scoring constants.
//!
//! This module defines the round lifecycle parameters (countdown, deadline)
//! and the win/point rules applied when a match finishes.

/// Countdown before each round starts (in seconds).
pub const COUNTDOWN_DURATION_SECS: u64 = 3;

/// Hard deadline for answering a round's question (in seconds).
pub const ROUND_DURATION_SECS: u64 = 15;

/// Round wins needed to take the match (first to this count).
pub const ROUND_WIN_TARGET: u8 = 5;

/// Points credited to the match winner, forwarded to the stats service.
pub const WINNER_POINTS: i32 = 25;

/// Consolation points credited to the loser.
pub const LOSER_POINTS: i32 = 5;

/// Delay before a finished match actor is torn down, leaving time for the
/// final events to flush to both clients.
pub const MATCH_TEARDOWN_GRACE_SECS: u64 = 5;

/// Total answer options shown for multiple-choice questions (decoys + correct).
pub const CHOICE_COUNT: usize = 5;
