use actix::prelude::*;

use super::types::{GameType, PlayerInfo, UserId};
use crate::server::session::PlayerSession;

/// Message: session asks to join the queue for a game type.
#[derive(Message)]
#[rtype(result = "()")]
pub struct JoinQueue {
    pub player: PlayerInfo,
    pub addr: Addr<PlayerSession>,
    pub game_type: GameType,
}

/// Message: session leaves the queue. Idempotent; leaving while not queued
/// is a no-op with no error.
#[derive(Message)]
#[rtype(result = "()")]
pub struct LeaveQueue {
    pub user: UserId,
    pub game_type: GameType,
}

/// Message: session's transport dropped; remove it silently wherever it waits.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub user: UserId,
}

/// Message: a match released its participants (finished or aborted); they
/// may queue again.
#[derive(Message)]
#[rtype(result = "()")]
pub struct MatchEnded {
    pub users: [UserId; 2],
}
