//! Matchmaking server actor.
//!
//! Owns the per-game-type waiting lists and the set of users currently in a
//! match. Pairs the two oldest waiting sessions of a game type and hands
//! them to the match manager; queue membership rules (one ticket per
//! session, never while in a match) are enforced here.

use actix::prelude::*;
use log::{debug, info};
use std::collections::HashSet;

use super::messages::{Disconnect, JoinQueue, LeaveQueue, MatchEnded};
use super::queue::{QueueError, WaitingLists};
use super::types::{GameType, UserId};
use crate::server::match_session::messages::{CreateMatch, ParticipantDisconnected};
use crate::server::match_session::server::MatchManager;
use crate::server::protocol::ServerEvent;
use crate::server::session::PlayerSession;

type SessionAddr = Addr<PlayerSession>;

pub struct MatchmakingServer {
    waiting: WaitingLists<SessionAddr>,
    /// Users currently bound to a live match; they cannot queue.
    in_match: HashSet<UserId>,
    match_manager: Addr<MatchManager>,
}

impl MatchmakingServer {
    pub fn new(match_manager: Addr<MatchManager>) -> Self {
        Self {
            waiting: WaitingLists::new(),
            in_match: HashSet::new(),
            match_manager,
        }
    }

    /// Pair the two oldest tickets for the game type, if available, and ask
    /// the match manager to spawn the match actor.
    fn try_pair(&mut self, game_type: GameType, ctx: &mut Context<Self>) {
        let Some((first, second)) = self.waiting.take_pair(game_type) else {
            return;
        };
        self.in_match.insert(first.player.id);
        self.in_match.insert(second.player.id);
        info!(
            "[Matchmaking] Paired {} and {} for {:?} (waited {:?} / {:?})",
            first.player.username,
            second.player.username,
            game_type,
            first.enqueued_at.elapsed(),
            second.enqueued_at.elapsed(),
        );
        self.match_manager.do_send(CreateMatch {
            game_type,
            entries: [
                (first.player, first.handle),
                (second.player, second.handle),
            ],
            matchmaking: ctx.address(),
        });
    }
}

impl Actor for MatchmakingServer {
    type Context = Context<Self>;
}

impl Handler<JoinQueue> for MatchmakingServer {
    type Result = ();

    /// Handles a session joining the waiting list for a game type.
    fn handle(&mut self, msg: JoinQueue, ctx: &mut Self::Context) -> Self::Result {
        if self.in_match.contains(&msg.player.id) {
            debug!(
                "[Matchmaking] {} tried to queue while in a match",
                msg.player.username
            );
            msg.addr
                .do_send(ServerEvent::queue_error(QueueError::AlreadyInMatch.message()));
            return;
        }
        match self
            .waiting
            .enqueue(msg.game_type, msg.player.clone(), msg.addr.clone())
        {
            Ok(()) => {
                debug!(
                    "[Matchmaking] {} queued for {:?} ({} waiting)",
                    msg.player.username,
                    msg.game_type,
                    self.waiting.waiting(msg.game_type)
                );
                msg.addr.do_send(ServerEvent::QueueJoined {
                    game_type: msg.game_type,
                });
                self.try_pair(msg.game_type, ctx);
            }
            Err(err) => {
                debug!(
                    "[Matchmaking] {} rejected from queue: {}",
                    msg.player.username,
                    err.message()
                );
                msg.addr.do_send(ServerEvent::queue_error(err.message()));
            }
        }
    }
}

impl Handler<LeaveQueue> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: LeaveQueue, _ctx: &mut Self::Context) -> Self::Result {
        if self.waiting.remove(&msg.user) {
            debug!("[Matchmaking] {} left the {:?} queue", msg.user, msg.game_type);
        }
    }
}

impl Handler<Disconnect> for MatchmakingServer {
    type Result = ();

    /// A queued session that disconnects is removed silently; it was never
    /// paired, so no opponent is affected. A paired user's disconnect is
    /// routed through the manager, since the user's own session may have
    /// dropped before learning its match id.
    fn handle(&mut self, msg: Disconnect, _ctx: &mut Self::Context) -> Self::Result {
        if self.waiting.remove(&msg.user) {
            debug!("[Matchmaking] {} removed from queue on disconnect", msg.user);
        } else if self.in_match.contains(&msg.user) {
            self.match_manager
                .do_send(ParticipantDisconnected { user: msg.user });
        }
    }
}

impl Handler<MatchEnded> for MatchmakingServer {
    type Result = ();

    fn handle(&mut self, msg: MatchEnded, _ctx: &mut Self::Context) -> Self::Result {
        for user in msg.users {
            self.in_match.remove(&user);
        }
    }
}
