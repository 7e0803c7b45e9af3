//! Replay a SAN move list into the per-position records the detectors read.

use motif_detectors::PositionContext;
use shakmaty::fen::Fen;
use shakmaty::san::San;
use shakmaty::{Chess, Color, EnPassantMode, Position};
use thiserror::Error;

use crate::pgn::PgnError;

#[derive(Error, Debug, Clone)]
pub enum ReplayError {
    #[error("unparseable SAN '{san}' at ply {ply}")]
    InvalidSan { ply: usize, san: String },

    #[error("illegal move '{san}' at ply {ply}")]
    IllegalMove { ply: usize, san: String },

    #[error("PGN error: {0}")]
    Pgn(#[from] PgnError),

    #[error("game {0} has no positions, moves or PGN")]
    EmptyRecord(String),
}

fn is_result_token(token: &str) -> bool {
    matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

fn context_for(pos: &Chess, last_move: Option<&str>) -> PositionContext {
    let fen = Fen::from_position(pos, EnPassantMode::Legal).to_string();
    PositionContext::new(fen, pos.fullmoves().get(), pos.turn() == Color::White, last_move)
}

/// Play `moves` from the initial position.
///
/// The result starts with the initial position (move number 0, no last
/// move) followed by one entry per move played. Result tokens and blanks
/// in the list are skipped.
pub fn replay_san<S: AsRef<str>>(moves: &[S]) -> Result<Vec<PositionContext>, ReplayError> {
    let mut pos = Chess::default();
    let mut start = context_for(&pos, None);
    start.move_number = 0;

    let mut positions = Vec::with_capacity(moves.len() + 1);
    positions.push(start);

    let mut ply = 0;
    for token in moves {
        let san_str = token.as_ref().trim();
        if san_str.is_empty() || is_result_token(san_str) {
            continue;
        }
        ply += 1;

        let san: San = san_str.parse().map_err(|_| ReplayError::InvalidSan {
            ply,
            san: san_str.to_string(),
        })?;
        let mv = san.to_move(&pos).map_err(|_| ReplayError::IllegalMove {
            ply,
            san: san_str.to_string(),
        })?;
        pos.play_unchecked(mv);

        positions.push(context_for(&pos, Some(san_str)));
    }

    Ok(positions)
}
