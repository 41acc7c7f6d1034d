use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated user id, shared with the REST account service.
pub type UserId = Uuid;

/// The game types offered in the online 1v1 mode.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum GameType {
    Globle,
    Flagle,
    Findle,
    Population,
    US,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct PlayerInfo {
    pub id: UserId,
    pub username: String,
}
