//! Pure 1v1 match state machine.
//!
//! Holds everything a match knows between events: the two participants,
//! the phase, the round counter, win counters, the active question, and
//! the submissions of the round in flight. All transitions are driven by
//! the owning actor; nothing here touches timers or the network, which
//! keeps the lifecycle rules testable on their own.
//!
//! Phases move `Countdown -> Playing -> RoundEnd -> (Countdown | Ended)`;
//! `Ended` is terminal. A match has exactly two participants from creation
//! to teardown.

use std::collections::HashSet;
use uuid::Uuid;

use super::resolver::{resolve_round, RoundOutcome, Submission};
use crate::config::game::{LOSER_POINTS, WINNER_POINTS};
use crate::game::question::Question;
use crate::server::matchmaking::types::{GameType, PlayerInfo, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Countdown,
    Playing,
    RoundEnd,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Second submission from the same participant in the same round.
    AlreadySubmitted,
    /// Submission arrived outside the Playing phase (benign client/server race).
    RoundClosed,
}

/// What the actor should do with an accepted submission.
#[derive(Debug, Clone, Copy)]
pub struct SubmitReceipt {
    pub correct: bool,
    /// True once the round can resolve early: a correct answer arrived, or
    /// both participants have submitted.
    pub resolve_now: bool,
}

/// Where the match goes after a resolved round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    /// Drawn round: replay with a fresh question, round number held.
    Replay,
    NextRound,
    Ended { winner_seat: usize },
}

/// Per-recipient end-of-match payload; built once per seat because
/// `isWinner` and the credited points differ between the two.
#[derive(Debug, Clone)]
pub struct GameEndReport {
    pub final_score: String,
    pub is_winner: bool,
    pub points: i32,
}

/// Resolution record, broadcast verbatim to both participants.
#[derive(Debug, Clone)]
pub struct RoundResult {
    pub round_number: u32,
    pub outcome: RoundOutcome,
    pub score: [u8; 2],
    pub correct_answer: String,
    pub next: NextStep,
    /// Round number of the upcoming round; unchanged on a draw replay.
    pub next_round: u32,
}

pub struct MatchState {
    pub match_id: Uuid,
    pub game_type: GameType,
    pub players: [PlayerInfo; 2],
    pub round_number: u32,
    pub wins: [u8; 2],
    pub win_target: u8,
    pub question: Question,
    pub phase: Phase,
    exclusions: HashSet<String>,
    submissions: Vec<Submission>,
    arrival_seq: u64,
}

impl MatchState {
    pub fn new(
        match_id: Uuid,
        game_type: GameType,
        players: [PlayerInfo; 2],
        first_question: Question,
        win_target: u8,
    ) -> Self {
        let mut exclusions = HashSet::new();
        exclusions.insert(first_question.exclusion_key().to_string());
        Self {
            match_id,
            game_type,
            players,
            round_number: 1,
            wins: [0, 0],
            win_target,
            question: first_question,
            phase: Phase::Countdown,
            exclusions,
            submissions: Vec::new(),
            arrival_seq: 0,
        }
    }

    pub fn seat_of(&self, user: &UserId) -> Option<usize> {
        self.players.iter().position(|p| p.id == *user)
    }

    pub fn exclusions(&self) -> &HashSet<String> {
        &self.exclusions
    }

    /// Countdown expired: open the round for submissions.
    pub fn begin_playing(&mut self) {
        self.submissions.clear();
        self.phase = Phase::Playing;
    }

    /// Register a submission for the active round. At most one accepted
    /// submission per participant per round; later ones are rejected, not
    /// queued.
    pub fn submit(&mut self, seat: usize, answer: &str) -> Result<SubmitReceipt, SubmitError> {
        if self.phase != Phase::Playing {
            return Err(SubmitError::RoundClosed);
        }
        if self.submissions.iter().any(|s| s.seat == seat) {
            return Err(SubmitError::AlreadySubmitted);
        }
        let correct = self.question.check(answer);
        self.submissions.push(Submission {
            seat,
            answer: answer.to_string(),
            arrival: self.arrival_seq,
        });
        self.arrival_seq += 1;
        Ok(SubmitReceipt {
            correct,
            resolve_now: correct || self.submissions.len() == 2,
        })
    }

    /// Resolve the active round and decide the follow-up transition. The
    /// caller broadcasts the result and then applies it with
    /// [`MatchState::advance`].
    pub fn resolve(&mut self) -> RoundResult {
        debug_assert_eq!(self.phase, Phase::Playing);
        self.phase = Phase::RoundEnd;

        let outcome = resolve_round(&self.submissions, &self.question);
        if let Some(seat) = outcome.winner {
            self.wins[seat] += 1;
        }

        let next = match outcome.winner {
            Some(seat) if self.wins[seat] >= self.win_target => NextStep::Ended { winner_seat: seat },
            Some(_) => NextStep::NextRound,
            None => NextStep::Replay,
        };
        let next_round = match next {
            NextStep::NextRound => self.round_number + 1,
            _ => self.round_number,
        };

        RoundResult {
            round_number: self.round_number,
            outcome,
            score: self.wins,
            correct_answer: self.question.correct_answer().to_string(),
            next,
            next_round,
        }
    }

    /// Apply the post-round transition: back to Countdown (round number
    /// incremented unless the round was a draw) or terminal Ended.
    pub fn advance(&mut self, next: NextStep) {
        debug_assert_eq!(self.phase, Phase::RoundEnd);
        match next {
            NextStep::Replay => self.phase = Phase::Countdown,
            NextStep::NextRound => {
                self.round_number += 1;
                self.phase = Phase::Countdown;
            }
            NextStep::Ended { .. } => self.phase = Phase::Ended,
        }
    }

    /// Install the next round's question, recording it against repeats.
    pub fn install_question(&mut self, question: Question) {
        self.exclusions.insert(question.exclusion_key().to_string());
        self.question = question;
    }

    /// Terminal transition used on participant disconnect. Completed rounds
    /// stand; nothing further is scored. Returns the surviving seat.
    pub fn abort(&mut self, leaver_seat: usize) -> usize {
        self.phase = Phase::Ended;
        1 - leaver_seat
    }

    /// Final score formatted winner-first, e.g. "5-3".
    pub fn final_score(&self, winner_seat: usize) -> String {
        format!("{}-{}", self.wins[winner_seat], self.wins[1 - winner_seat])
    }

    /// The gameEnd payloads for both seats, in seat order.
    pub fn end_reports(&self, winner_seat: usize) -> [GameEndReport; 2] {
        let final_score = self.final_score(winner_seat);
        [0, 1].map(|seat| GameEndReport {
            final_score: final_score.clone(),
            is_winner: seat == winner_seat,
            points: if seat == winner_seat {
                WINNER_POINTS
            } else {
                LOSER_POINTS
            },
        })
    }
}
