use actix::prelude::*;
use uuid::Uuid;

use super::server::MatchSession;
use crate::server::matchmaking::server::MatchmakingServer;
use crate::server::matchmaking::types::{GameType, PlayerInfo, UserId};
use crate::server::session::PlayerSession;

/// Message: matchmaking produced a pair; spawn a match actor for it.
#[derive(Message)]
#[rtype(result = "()")]
pub struct CreateMatch {
    pub game_type: GameType,
    pub entries: [(PlayerInfo, Addr<PlayerSession>); 2],
    pub matchmaking: Addr<MatchmakingServer>,
}

/// Message: a participant's answer, routed from their session actor. The
/// session already checked the match id; `time_taken` is client-reported
/// and used for logging only.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SubmitAnswer {
    pub user: UserId,
    pub answer: String,
    pub time_taken: Option<u64>,
}

/// Message: a participant's transport dropped mid-match.
#[derive(Message)]
#[rtype(result = "()")]
pub struct ParticipantDisconnected {
    pub user: UserId,
}

/// Message: a match reached its terminal state; drop it from the manager.
#[derive(Message)]
#[rtype(result = "()")]
pub struct MatchClosed {
    pub match_id: Uuid,
}

/// Message to a session actor: you are now bound to this match.
#[derive(Message)]
#[rtype(result = "()")]
pub struct MatchAssigned {
    pub match_id: Uuid,
    pub addr: Addr<MatchSession>,
}

/// Message to a session actor: your match is over, you are idle again.
#[derive(Message)]
#[rtype(result = "()")]
pub struct MatchOver {
    pub match_id: Uuid,
}
