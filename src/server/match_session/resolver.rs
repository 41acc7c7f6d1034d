//! Round resolution decision table.
//!
//! Given the accepted submissions of one round (zero, one, or two), decides
//! correctness and the round winner. "Earlier" means the server's receipt
//! sequence for the submission; client-reported timings are untrusted and
//! never influence the outcome. A true tie (equal arrival) is a draw and
//! the round is replayed rather than arbitrarily awarded.

use crate::game::question::Question;

/// One accepted submission. `seat` is the participant index (0 or 1),
/// `arrival` the server receipt sequence within the round.
#[derive(Debug, Clone)]
pub struct Submission {
    pub seat: usize,
    pub answer: String,
    pub arrival: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundOutcome {
    /// Winning seat, or None for a draw.
    pub winner: Option<usize>,
    /// Correctness per seat, in seat order.
    pub correct: [bool; 2],
}

impl RoundOutcome {
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

/// Pure function of the submissions and the canonical answer; identical
/// inputs always resolve identically.
pub fn resolve_round(submissions: &[Submission], question: &Question) -> RoundOutcome {
    let mut correct = [false; 2];
    for sub in submissions {
        if question.check(&sub.answer) {
            correct[sub.seat] = true;
        }
    }

    let mut winners: Vec<&Submission> = submissions
        .iter()
        .filter(|s| correct[s.seat])
        .collect();
    winners.sort_by_key(|s| s.arrival);

    let winner = match winners.as_slice() {
        [] => None,
        [only] => Some(only.seat),
        [first, second] => {
            if first.arrival == second.arrival {
                // Indistinguishable order: draw, replay the round.
                None
            } else {
                Some(first.seat)
            }
        }
        _ => unreachable!("at most one submission per seat"),
    };

    RoundOutcome { winner, correct }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::question::{QuestionGenerator, CanonicalAnswer};
    use crate::server::matchmaking::types::GameType;
    use std::collections::HashSet;

    fn question_with_answer(answer: &str) -> Question {
        Question {
            game_type: GameType::Globle,
            prompt: format!("Find the country: {}", answer),
            choices: Vec::new(),
            answer: CanonicalAnswer::Exact(answer.to_string()),
            display: answer.to_string(),
            exclusion_key: answer.to_string(),
        }
    }

    fn sub(seat: usize, answer: &str, arrival: u64) -> Submission {
        Submission {
            seat,
            answer: answer.to_string(),
            arrival,
        }
    }

    #[test]
    fn single_correct_submission_wins() {
        let q = question_with_answer("France");
        let outcome = resolve_round(&[sub(1, "France", 0)], &q);
        assert_eq!(outcome.winner, Some(1));
        assert_eq!(outcome.correct, [false, true]);
        assert!(!outcome.is_draw());
    }

    #[test]
    fn earlier_correct_submission_beats_later_one() {
        let q = question_with_answer("France");
        let outcome = resolve_round(&[sub(0, "France", 0), sub(1, "France", 1)], &q);
        assert_eq!(outcome.winner, Some(0));
        assert_eq!(outcome.correct, [true, true]);

        // Order of the slice must not matter, only arrival.
        let outcome = resolve_round(&[sub(1, "France", 1), sub(0, "France", 0)], &q);
        assert_eq!(outcome.winner, Some(0));
    }

    #[test]
    fn equal_arrival_is_a_draw() {
        let q = question_with_answer("France");
        let outcome = resolve_round(&[sub(0, "France", 3), sub(1, "France", 3)], &q);
        assert!(outcome.is_draw());
        assert_eq!(outcome.correct, [true, true]);
    }

    #[test]
    fn wrong_submission_loses_to_correct_one_regardless_of_order() {
        let q = question_with_answer("France");
        let outcome = resolve_round(&[sub(0, "Germany", 0), sub(1, "France", 1)], &q);
        assert_eq!(outcome.winner, Some(1));
        assert_eq!(outcome.correct, [false, true]);
    }

    #[test]
    fn no_correct_submissions_is_a_draw() {
        let q = question_with_answer("France");
        let outcome = resolve_round(&[sub(0, "Germany", 0), sub(1, "Spain", 1)], &q);
        assert!(outcome.is_draw());
        assert_eq!(outcome.correct, [false, false]);
    }

    #[test]
    fn deadline_with_no_submissions_is_a_draw() {
        let q = question_with_answer("France");
        let outcome = resolve_round(&[], &q);
        assert!(outcome.is_draw());
        assert_eq!(outcome.correct, [false, false]);
    }

    #[test]
    fn answers_are_normalized_before_comparison() {
        let q = question_with_answer("France");
        let outcome = resolve_round(&[sub(0, "  fRaNcE ", 0)], &q);
        assert_eq!(outcome.winner, Some(0));
    }

    #[test]
    fn set_membership_answers_accept_any_member() {
        let generator = QuestionGenerator::new();
        let q = generator.next_question(GameType::Findle, &HashSet::new());
        // Submit the sampled canonical display, stripped of its "e.g. " prefix.
        let member = q.correct_answer().trim_start_matches("e.g. ").to_string();
        let outcome = resolve_round(&[sub(0, &member, 0)], &q);
        assert_eq!(outcome.winner, Some(0));
    }

    #[test]
    fn resolution_is_deterministic() {
        let q = question_with_answer("France");
        let subs = [sub(0, "France", 1), sub(1, "France", 2)];
        let first = resolve_round(&subs, &q);
        for _ in 0..10 {
            assert_eq!(resolve_round(&subs, &q), first);
        }
    }
}
