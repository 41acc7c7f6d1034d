//! Pure waiting-list structure behind the matchmaking server actor.
//!
//! Generic over the session handle type so pairing rules can be tested
//! without an actor system or a network stack. Strict FIFO per game type:
//! no skill or latency matching, which keeps waits short for a casual
//! trivia mode.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use super::types::{GameType, PlayerInfo, UserId};
use crate::config::matchmaking::MATCH_SIZE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    AlreadyQueued,
    AlreadyInMatch,
}

impl QueueError {
    pub fn message(&self) -> &'static str {
        match self {
            QueueError::AlreadyQueued => "already queued",
            QueueError::AlreadyInMatch => "already in a match",
        }
    }
}

/// A waiting player's ticket, scoped to one game type.
#[derive(Debug, Clone)]
pub struct QueueEntry<H> {
    pub player: PlayerInfo,
    pub handle: H,
    pub enqueued_at: Instant,
}

pub struct WaitingLists<H> {
    queues: HashMap<GameType, VecDeque<QueueEntry<H>>>,
}

impl<H> WaitingLists<H> {
    pub fn new() -> Self {
        Self {
            queues: HashMap::new(),
        }
    }

    /// True if the user holds a ticket in any game type's queue.
    pub fn contains(&self, user: &UserId) -> bool {
        self.queues
            .values()
            .any(|q| q.iter().any(|e| e.player.id == *user))
    }

    /// Append a ticket to the tail of the game type's queue. A session may
    /// hold at most one ticket across all game types.
    pub fn enqueue(
        &mut self,
        game_type: GameType,
        player: PlayerInfo,
        handle: H,
    ) -> Result<(), QueueError> {
        if self.contains(&player.id) {
            return Err(QueueError::AlreadyQueued);
        }
        self.queues
            .entry(game_type)
            .or_default()
            .push_back(QueueEntry {
                player,
                handle,
                enqueued_at: Instant::now(),
            });
        Ok(())
    }

    /// Drop the user's ticket wherever it is. Idempotent: removing an
    /// absent user is a no-op, used by both explicit leave and disconnect.
    pub fn remove(&mut self, user: &UserId) -> bool {
        for queue in self.queues.values_mut() {
            if let Some(pos) = queue.iter().position(|e| e.player.id == *user) {
                queue.remove(pos);
                return true;
            }
        }
        false
    }

    /// Take the two oldest tickets for the game type, if it has at least
    /// two waiting players.
    pub fn take_pair(&mut self, game_type: GameType) -> Option<(QueueEntry<H>, QueueEntry<H>)> {
        let queue = self.queues.get_mut(&game_type)?;
        if queue.len() < MATCH_SIZE {
            return None;
        }
        let first = queue.pop_front()?;
        let second = queue.pop_front()?;
        Some((first, second))
    }

    pub fn waiting(&self, game_type: GameType) -> usize {
        self.queues.get(&game_type).map_or(0, |q| q.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn player(name: &str) -> PlayerInfo {
        PlayerInfo {
            id: Uuid::new_v4(),
            username: name.to_string(),
        }
    }

    #[test]
    fn pairs_the_two_oldest_entries_first() {
        let mut lists: WaitingLists<u32> = WaitingLists::new();
        let (a, b, c) = (player("a"), player("b"), player("c"));
        lists.enqueue(GameType::Flagle, a.clone(), 1).unwrap();
        lists.enqueue(GameType::Flagle, b.clone(), 2).unwrap();
        lists.enqueue(GameType::Flagle, c.clone(), 3).unwrap();

        let (first, second) = lists.take_pair(GameType::Flagle).unwrap();
        assert_eq!(first.player.id, a.id);
        assert_eq!(second.player.id, b.id);
        // C keeps waiting for the next pair.
        assert_eq!(lists.waiting(GameType::Flagle), 1);
        assert!(lists.contains(&c.id));
    }

    #[test]
    fn no_pair_until_two_are_waiting() {
        let mut lists: WaitingLists<u32> = WaitingLists::new();
        lists.enqueue(GameType::Globle, player("solo"), 1).unwrap();
        assert!(lists.take_pair(GameType::Globle).is_none());
        assert_eq!(lists.waiting(GameType::Globle), 1);
    }

    #[test]
    fn game_types_queue_independently() {
        let mut lists: WaitingLists<u32> = WaitingLists::new();
        lists.enqueue(GameType::Globle, player("a"), 1).unwrap();
        lists.enqueue(GameType::Flagle, player("b"), 2).unwrap();
        assert!(lists.take_pair(GameType::Globle).is_none());
        assert!(lists.take_pair(GameType::Flagle).is_none());
    }

    #[test]
    fn double_enqueue_is_rejected() {
        let mut lists: WaitingLists<u32> = WaitingLists::new();
        let a = player("a");
        lists.enqueue(GameType::Globle, a.clone(), 1).unwrap();
        let err = lists.enqueue(GameType::Globle, a.clone(), 1).unwrap_err();
        assert_eq!(err, QueueError::AlreadyQueued);
        // Also rejected across game types: one ticket per session.
        let err = lists.enqueue(GameType::Flagle, a, 1).unwrap_err();
        assert_eq!(err, QueueError::AlreadyQueued);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut lists: WaitingLists<u32> = WaitingLists::new();
        let a = player("a");
        lists.enqueue(GameType::Globle, a.clone(), 1).unwrap();
        assert!(lists.remove(&a.id));
        assert!(!lists.remove(&a.id));
        assert!(!lists.contains(&a.id));
    }

    #[test]
    fn removed_entries_never_get_paired() {
        let mut lists: WaitingLists<u32> = WaitingLists::new();
        let (a, b, c) = (player("a"), player("b"), player("c"));
        lists.enqueue(GameType::US, a.clone(), 1).unwrap();
        lists.enqueue(GameType::US, b.clone(), 2).unwrap();
        lists.remove(&a.id);
        lists.enqueue(GameType::US, c.clone(), 3).unwrap();

        let (first, second) = lists.take_pair(GameType::US).unwrap();
        assert_eq!(first.player.id, b.id);
        assert_eq!(second.player.id, c.id);
    }
}
