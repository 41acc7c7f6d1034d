use actix::prelude::*;
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use uuid::Uuid;

use super::messages::{
    CreateMatch, MatchAssigned, MatchClosed, MatchOver, ParticipantDisconnected, SubmitAnswer,
};
use super::state::{GameEndReport, MatchState, NextStep, Phase, SubmitError};
use crate::config::game::{
    COUNTDOWN_DURATION_SECS, MATCH_TEARDOWN_GRACE_SECS, ROUND_DURATION_SECS, ROUND_WIN_TARGET,
};
use crate::game::question::QuestionGenerator;
use crate::server::matchmaking::messages::MatchEnded;
use crate::server::matchmaking::server::MatchmakingServer;
use crate::server::matchmaking::types::UserId;
use crate::server::protocol::ServerEvent;
use crate::server::session::PlayerSession;
use crate::server::stats::{MatchCompleted, StatsRecorder};

/// Actor driving one live 1v1 match.
///
/// Wraps the pure [`MatchState`] machine with timers and broadcasts. All
/// mutations of a match's state go through this actor's mailbox, so round
/// transitions are totally ordered per match; distinct matches share
/// nothing and interleave freely.
pub struct MatchSession {
    state: MatchState,
    sessions: [Addr<PlayerSession>; 2],
    generator: QuestionGenerator,
    manager: Addr<MatchManager>,
    matchmaking: Addr<MatchmakingServer>,
    stats: Addr<StatsRecorder>,
    timer: Option<SpawnHandle>,
    /// Set while a fresh question is owed at the next countdown expiry
    /// (round 1's question is generated at creation instead).
    needs_fresh_question: bool,
}

impl Actor for MatchSession {
    type Context = Context<Self>;

    /// Countdown begins as soon as the pairing succeeds; both participants
    /// get the same matchFound payload.
    fn started(&mut self, ctx: &mut Self::Context) {
        // A socket can drop in the window between pairing and this actor
        // starting; sends to a dead session's mailbox go nowhere.
        if let Some(seat) = self.sessions.iter().position(|s| !s.connected()) {
            self.abort_on_disconnect(seat, ctx);
            return;
        }
        self.broadcast(ServerEvent::MatchFound {
            match_id: self.state.match_id,
            game_type: self.state.game_type,
            players: self.state.players.to_vec(),
            round_number: self.state.round_number,
            question: self.state.question.public(),
        });
        for session in &self.sessions {
            session.do_send(MatchAssigned {
                match_id: self.state.match_id,
                addr: ctx.address(),
            });
        }
        self.schedule_countdown(ctx);
    }
}

impl MatchSession {
    fn new(
        state: MatchState,
        sessions: [Addr<PlayerSession>; 2],
        generator: QuestionGenerator,
        manager: Addr<MatchManager>,
        matchmaking: Addr<MatchmakingServer>,
        stats: Addr<StatsRecorder>,
    ) -> Self {
        Self {
            state,
            sessions,
            generator,
            manager,
            matchmaking,
            stats,
            timer: None,
            needs_fresh_question: false,
        }
    }

    /// Deliver the same event to both participants.
    fn broadcast(&self, event: ServerEvent) {
        for session in &self.sessions {
            session.do_send(event.clone());
        }
    }

    fn cancel_timer(&mut self, ctx: &mut Context<Self>) {
        if let Some(handle) = self.timer.take() {
            ctx.cancel_future(handle);
        }
    }

    fn schedule_countdown(&mut self, ctx: &mut Context<Self>) {
        let handle = ctx.run_later(Duration::from_secs(COUNTDOWN_DURATION_SECS), |act, ctx| {
            act.begin_round(ctx);
        });
        self.timer = Some(handle);
    }

    /// Countdown expired: fix the round's question (fresh one after round 1),
    /// open submissions, and arm the round deadline. Both participants get an
    /// identical gameStart payload.
    fn begin_round(&mut self, ctx: &mut Context<Self>) {
        if self.state.phase != Phase::Countdown {
            return;
        }
        if self.needs_fresh_question {
            let question = self
                .generator
                .next_question(self.state.game_type, self.state.exclusions());
            self.state.install_question(question);
            self.needs_fresh_question = false;
        }
        self.state.begin_playing();
        debug!(
            "[Match] match_id={} round {} playing",
            self.state.match_id, self.state.round_number
        );
        self.broadcast(ServerEvent::GameStart {
            match_id: self.state.match_id,
            question: self.state.question.public(),
            round_number: self.state.round_number,
        });
        let handle = ctx.run_later(Duration::from_secs(ROUND_DURATION_SECS), |act, ctx| {
            act.finish_round(ctx);
        });
        self.timer = Some(handle);
    }

    /// Resolve the active round and broadcast the verbatim result record,
    /// then either loop back to a countdown or end the match. Reached from
    /// the deadline timer and from early resolution on submissions; the
    /// phase guard makes the two paths race-free.
    fn finish_round(&mut self, ctx: &mut Context<Self>) {
        if self.state.phase != Phase::Playing {
            return;
        }
        self.cancel_timer(ctx);

        let result = self.state.resolve();
        self.broadcast(ServerEvent::RoundEnd {
            round_winner: result
                .outcome
                .winner
                .map(|seat| self.state.players[seat].id),
            round_number: result.round_number,
            score: result.score,
            is_draw: result.outcome.is_draw(),
            correct_answer: result.correct_answer.clone(),
            next_round: result.next_round,
        });

        match result.next {
            NextStep::Ended { winner_seat } => self.end_match(winner_seat, ctx),
            step => {
                self.state.advance(step);
                self.needs_fresh_question = true;
                if let NextStep::Replay = step {
                    debug!(
                        "[Match] match_id={} round {} drawn, replaying",
                        self.state.match_id, self.state.round_number
                    );
                }
                self.schedule_countdown(ctx);
            }
        }
    }

    /// Terminal transition on a won match: per-recipient gameEnd in the same
    /// event cycle as the final roundEnd, stats fan-out, and teardown after a
    /// grace delay.
    fn end_match(&mut self, winner_seat: usize, ctx: &mut Context<Self>) {
        self.state.advance(NextStep::Ended { winner_seat });
        info!(
            "[Match] match_id={} ended {} winner={}",
            self.state.match_id,
            self.state.final_score(winner_seat),
            self.state.players[winner_seat].username
        );

        let reports = self.state.end_reports(winner_seat);
        for (seat, report) in reports.into_iter().enumerate() {
            let GameEndReport {
                final_score,
                is_winner,
                points,
            } = report;
            self.sessions[seat].do_send(ServerEvent::GameEnd {
                final_score,
                is_winner,
                user_points: points,
            });
            self.sessions[seat].do_send(MatchOver {
                match_id: self.state.match_id,
            });
            self.stats.do_send(MatchCompleted {
                game_type: self.state.game_type,
                user: self.state.players[seat].id,
                round_wins: self.state.wins[seat],
                won: is_winner,
                points,
            });
        }
        self.release(ctx);
        let handle = ctx.run_later(Duration::from_secs(MATCH_TEARDOWN_GRACE_SECS), |_, ctx| {
            ctx.stop();
        });
        self.timer = Some(handle);
    }

    fn release(&mut self, _ctx: &mut Context<Self>) {
        self.matchmaking.do_send(MatchEnded {
            users: [self.state.players[0].id, self.state.players[1].id],
        });
        self.manager.do_send(MatchClosed {
            match_id: self.state.match_id,
        });
    }

    /// One participant is gone: the survivor is notified, completed rounds
    /// stand, and nothing further is scored.
    fn abort_on_disconnect(&mut self, seat: usize, ctx: &mut Context<Self>) {
        self.cancel_timer(ctx);
        let survivor = self.state.abort(seat);
        info!(
            "[Match] match_id={} aborted: {} disconnected",
            self.state.match_id, self.state.players[seat].username
        );
        self.sessions[survivor].do_send(ServerEvent::OpponentDisconnected);
        self.sessions[survivor].do_send(MatchOver {
            match_id: self.state.match_id,
        });
        self.release(ctx);
        ctx.stop();
    }
}

impl Handler<SubmitAnswer> for MatchSession {
    type Result = ();

    fn handle(&mut self, msg: SubmitAnswer, ctx: &mut Self::Context) -> Self::Result {
        let Some(seat) = self.state.seat_of(&msg.user) else {
            warn!(
                "[Match] match_id={} submission from non-participant {}",
                self.state.match_id, msg.user
            );
            return;
        };
        match self.state.submit(seat, &msg.answer) {
            Ok(receipt) => {
                debug!(
                    "[Match] match_id={} round {} answer from {} correct={} time_taken={:?}",
                    self.state.match_id,
                    self.state.round_number,
                    self.state.players[seat].username,
                    receipt.correct,
                    msg.time_taken,
                );
                if receipt.resolve_now {
                    self.finish_round(ctx);
                }
            }
            Err(SubmitError::AlreadySubmitted) => {
                self.sessions[seat].do_send(ServerEvent::error(
                    "ALREADY_SUBMITTED",
                    "You already answered this round.",
                ));
            }
            Err(SubmitError::RoundClosed) => {
                // Benign race between the client and the round deadline; the
                // roundEnd broadcast already corrects the client's view.
                warn!(
                    "[Match] match_id={} late submission from {} ignored",
                    self.state.match_id, self.state.players[seat].username
                );
            }
        }
    }
}

impl Handler<ParticipantDisconnected> for MatchSession {
    type Result = ();

    /// Disconnect mid-match is fatal for this match only; distinct matches
    /// are unaffected.
    fn handle(&mut self, msg: ParticipantDisconnected, ctx: &mut Self::Context) -> Self::Result {
        if self.state.phase == Phase::Ended {
            return;
        }
        let Some(seat) = self.state.seat_of(&msg.user) else {
            return;
        };
        self.abort_on_disconnect(seat, ctx);
    }
}

/// User -> live match routing table. A disconnect can arrive before the
/// user's session ever learned its match id, so the manager keeps its own
/// view of who is in which match.
struct MatchIndex {
    by_user: HashMap<UserId, Uuid>,
}

impl MatchIndex {
    fn new() -> Self {
        Self {
            by_user: HashMap::new(),
        }
    }

    fn register(&mut self, match_id: Uuid, users: [UserId; 2]) {
        for user in users {
            self.by_user.insert(user, match_id);
        }
    }

    fn match_of(&self, user: &UserId) -> Option<Uuid> {
        self.by_user.get(user).copied()
    }

    fn close(&mut self, match_id: Uuid) {
        self.by_user.retain(|_, id| *id != match_id);
    }
}

/// Spawns match actors and tracks the live ones by id.
pub struct MatchManager {
    matches: HashMap<Uuid, Addr<MatchSession>>,
    index: MatchIndex,
    generator: QuestionGenerator,
    stats: Addr<StatsRecorder>,
}

impl MatchManager {
    pub fn new(stats: Addr<StatsRecorder>) -> Self {
        Self {
            matches: HashMap::new(),
            index: MatchIndex::new(),
            generator: QuestionGenerator::new(),
            stats,
        }
    }
}

impl Actor for MatchManager {
    type Context = Context<Self>;
}

impl Handler<CreateMatch> for MatchManager {
    type Result = ();

    fn handle(&mut self, msg: CreateMatch, ctx: &mut Self::Context) -> Self::Result {
        let match_id = Uuid::new_v4();
        let [(first, first_addr), (second, second_addr)] = msg.entries;
        self.index.register(match_id, [first.id, second.id]);
        let question = self.generator.next_question(msg.game_type, &HashSet::new());
        let state = MatchState::new(
            match_id,
            msg.game_type,
            [first, second],
            question,
            ROUND_WIN_TARGET,
        );
        let session = MatchSession::new(
            state,
            [first_addr, second_addr],
            self.generator.clone(),
            ctx.address(),
            msg.matchmaking,
            self.stats.clone(),
        )
        .start();
        self.matches.insert(match_id, session);
        info!(
            "[MatchManager] created match_id={} ({:?}), {} live",
            match_id,
            msg.game_type,
            self.matches.len()
        );
    }
}

impl Handler<MatchClosed> for MatchManager {
    type Result = ();

    fn handle(&mut self, msg: MatchClosed, _ctx: &mut Self::Context) -> Self::Result {
        self.matches.remove(&msg.match_id);
        self.index.close(msg.match_id);
        debug!(
            "[MatchManager] closed match_id={}, {} live",
            msg.match_id,
            self.matches.len()
        );
    }
}

impl Handler<ParticipantDisconnected> for MatchManager {
    type Result = ();

    /// Routes a disconnect for a user whose own session could not: the
    /// socket dropped before the session was told its match id.
    fn handle(&mut self, msg: ParticipantDisconnected, _ctx: &mut Self::Context) -> Self::Result {
        let Some(match_id) = self.index.match_of(&msg.user) else {
            return;
        };
        if let Some(addr) = self.matches.get(&match_id) {
            addr.do_send(msg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_routes_each_participant_to_their_match() {
        let mut index = MatchIndex::new();
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let match_id = Uuid::new_v4();
        index.register(match_id, [a, b]);

        assert_eq!(index.match_of(&a), Some(match_id));
        assert_eq!(index.match_of(&b), Some(match_id));
        assert_eq!(index.match_of(&Uuid::new_v4()), None);
    }

    #[test]
    fn closing_a_match_clears_only_its_participants() {
        let mut index = MatchIndex::new();
        let (a, b, c, d) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
        let (first, second) = (Uuid::new_v4(), Uuid::new_v4());
        index.register(first, [a, b]);
        index.register(second, [c, d]);

        index.close(first);
        assert_eq!(index.match_of(&a), None);
        assert_eq!(index.match_of(&b), None);
        assert_eq!(index.match_of(&c), Some(second));
        assert_eq!(index.match_of(&d), Some(second));
    }
}
