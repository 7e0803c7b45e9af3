//! Game input: PGN text, SAN move lists and their replay into positions.

pub mod game_data;
pub mod pgn;
pub mod replay;

pub use game_data::GameRecord;
pub use replay::{replay_san, ReplayError};
