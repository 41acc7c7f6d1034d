//! Boundary to the stats/badge service.
//!
//! Matches fire `MatchCompleted` per participant and never wait for a
//! reply; the recorder forwards aggregates to the account backend (the
//! in-process recorder logs them). Match outcomes are unaffected if the
//! service is down.

use actix::prelude::*;
use log::info;

use crate::server::matchmaking::types::{GameType, UserId};

#[derive(Message, Clone, Debug)]
#[rtype(result = "()")]
pub struct MatchCompleted {
    pub game_type: GameType,
    pub user: UserId,
    pub round_wins: u8,
    pub won: bool,
    pub points: i32,
}

pub struct StatsRecorder;

impl StatsRecorder {
    pub fn new() -> Self {
        StatsRecorder
    }
}

impl Actor for StatsRecorder {
    type Context = Context<Self>;
}

impl Handler<MatchCompleted> for StatsRecorder {
    type Result = ();

    fn handle(&mut self, msg: MatchCompleted, _ctx: &mut Self::Context) -> Self::Result {
        info!(
            "[Stats] user={} game={:?} round_wins={} won={} points={}",
            msg.user, msg.game_type, msg.round_wins, msg.won, msg.points
        );
    }
}
