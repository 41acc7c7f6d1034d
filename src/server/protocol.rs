//! Wire protocol for the real-time channel.
//!
//! Both directions use `{"event": ..., "data": ...}` frames with camelCase
//! payload fields. Every broadcast a match emits carries an identical
//! payload for both participants, except `gameEnd` whose fields are
//! per-recipient.

use actix::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::question::PublicQuestion;
use crate::server::matchmaking::types::{GameType, PlayerInfo, UserId};

/// Client -> server events.
#[derive(Deserialize, Clone, Debug)]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    JoinQueue { game_type: GameType },
    #[serde(rename_all = "camelCase")]
    LeaveQueue { game_type: GameType },
    #[serde(rename_all = "camelCase")]
    SubmitAnswer {
        match_id: Uuid,
        answer: String,
        #[serde(default)]
        time_taken: Option<u64>,
    },
    /// Emitted by the client after a finished match; behaves like joinQueue.
    #[serde(rename_all = "camelCase")]
    RequestNewOpponent { game_type: GameType },
    Ping,
}

/// Server -> client events.
#[derive(Message, Serialize, Clone, Debug)]
#[rtype(result = "()")]
#[serde(tag = "event", content = "data", rename_all = "camelCase")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    QueueJoined { game_type: GameType },
    #[serde(rename_all = "camelCase")]
    QueueError { message: String },
    #[serde(rename_all = "camelCase")]
    MatchFound {
        match_id: Uuid,
        game_type: GameType,
        players: Vec<PlayerInfo>,
        round_number: u32,
        question: PublicQuestion,
    },
    #[serde(rename_all = "camelCase")]
    GameStart {
        match_id: Uuid,
        question: PublicQuestion,
        round_number: u32,
    },
    #[serde(rename_all = "camelCase")]
    RoundEnd {
        round_winner: Option<UserId>,
        round_number: u32,
        /// Win counts in `players` order from matchFound.
        score: [u8; 2],
        is_draw: bool,
        correct_answer: String,
        next_round: u32,
    },
    #[serde(rename_all = "camelCase")]
    GameEnd {
        final_score: String,
        is_winner: bool,
        user_points: i32,
    },
    OpponentDisconnected,
    #[serde(rename_all = "camelCase")]
    Error { code: String, message: String },
}

impl ServerEvent {
    pub fn queue_error(message: &str) -> Self {
        Self::QueueError {
            message: message.to_string(),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self::Error {
            code: code.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn client_events_parse_from_wire_frames() {
        let frame = r#"{"event":"joinQueue","data":{"gameType":"Flagle"}}"#;
        match serde_json::from_str::<ClientEvent>(frame).unwrap() {
            ClientEvent::JoinQueue { game_type } => assert_eq!(game_type, GameType::Flagle),
            other => panic!("unexpected event: {:?}", other),
        }

        let frame = r#"{"event":"submitAnswer","data":{"matchId":"7f2c1e9a-3b4d-4c5e-8f6a-1b2c3d4e5f60","answer":"France","timeTaken":4}}"#;
        match serde_json::from_str::<ClientEvent>(frame).unwrap() {
            ClientEvent::SubmitAnswer {
                match_id,
                answer,
                time_taken,
            } => {
                assert_eq!(
                    match_id,
                    Uuid::from_str("7f2c1e9a-3b4d-4c5e-8f6a-1b2c3d4e5f60").unwrap()
                );
                assert_eq!(answer, "France");
                assert_eq!(time_taken, Some(4));
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn time_taken_is_optional() {
        let frame = r#"{"event":"submitAnswer","data":{"matchId":"7f2c1e9a-3b4d-4c5e-8f6a-1b2c3d4e5f60","answer":"France"}}"#;
        assert!(serde_json::from_str::<ClientEvent>(frame).is_ok());
    }

    #[test]
    fn queue_joined_echoes_the_game_type() {
        let event = ServerEvent::QueueJoined {
            game_type: GameType::Globle,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "queueJoined");
        assert_eq!(value["data"]["gameType"], "Globle");
    }

    #[test]
    fn server_events_use_event_data_framing() {
        let event = ServerEvent::RoundEnd {
            round_winner: None,
            round_number: 2,
            score: [1, 0],
            is_draw: true,
            correct_answer: "France".to_string(),
            next_round: 2,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "roundEnd");
        assert_eq!(value["data"]["isDraw"], true);
        assert_eq!(value["data"]["roundWinner"], serde_json::Value::Null);
        assert_eq!(value["data"]["nextRound"], 2);

        let event = ServerEvent::OpponentDisconnected;
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "opponentDisconnected");
    }
}
