//! Game content layer: the embedded geography dataset and the per-game-type
//! question generator. No match state lives here; a question is fixed when
//! generated and never mutated by the round it is used in.

pub mod data;
pub mod question;
