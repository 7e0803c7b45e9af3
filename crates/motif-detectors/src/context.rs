//! Per-position input and its decoded snapshot.

use serde::{Deserialize, Serialize};

use crate::board::{is_white, squares, Board, Square, EMPTY};
use crate::occurrence::Side;

/// One position of a replayed game, as handed over by the replayer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionContext {
    /// Full FEN or bare placement.
    pub fen: String,
    pub move_number: u32,
    /// Side to move in this position, i.e. after `last_move` was played.
    pub white_to_move: bool,
    /// SAN of the move that produced this position; None for the start.
    #[serde(default)]
    pub last_move: Option<String>,
}

impl PositionContext {
    pub fn new(
        fen: impl Into<String>,
        move_number: u32,
        white_to_move: bool,
        last_move: Option<&str>,
    ) -> Self {
        Self {
            fen: fen.into(),
            move_number,
            white_to_move,
            last_move: last_move.map(str::to_string),
        }
    }

    /// The side that played `last_move`.
    pub fn mover(&self) -> Side {
        Side::from_white(!self.white_to_move)
    }

    pub fn mover_is_white(&self) -> bool {
        !self.white_to_move
    }

    pub fn last_move(&self) -> Option<&str> {
        self.last_move.as_deref()
    }
}

/// A position paired with its board, decoded once per game. `board` is None
/// when the placement could not be decoded; detectors skip such positions.
#[derive(Debug, Clone)]
pub struct Snapshot<'a> {
    pub ctx: &'a PositionContext,
    pub board: Option<Board>,
}

impl<'a> Snapshot<'a> {
    pub fn decode(ctx: &'a PositionContext) -> Self {
        let board = match Board::decode(&ctx.fen) {
            Ok(board) => Some(board),
            Err(err) => {
                tracing::debug!(move_number = ctx.move_number, error = %err, "skipping undecodable position");
                None
            }
        };
        Self { ctx, board }
    }
}

/// Consecutive decoded positions `(before, after)` with the move that links them.
pub struct MovePair<'s> {
    pub before: &'s Board,
    pub after: &'s Board,
    pub ctx: &'s PositionContext,
    pub san: &'s str,
}

impl MovePair<'_> {
    pub fn mover_is_white(&self) -> bool {
        self.ctx.mover_is_white()
    }

    /// Squares that held a mover piece before the move and are empty after.
    pub fn vacated(&self) -> Vec<Square> {
        let white = self.mover_is_white();
        squares()
            .filter(|&sq| {
                let was = self.before.at(sq);
                was != EMPTY && is_white(was) == white && self.after.at(sq) == EMPTY
            })
            .collect()
    }

    /// First square (scan order) where a mover piece now stands that was
    /// empty or enemy-held before. For castling this is the king or rook
    /// square, whichever comes first.
    pub fn arrival(&self) -> Option<Square> {
        let white = self.mover_is_white();
        squares().find(|&sq| {
            let now = self.after.at(sq);
            let was = self.before.at(sq);
            now != EMPTY && is_white(now) == white && (was == EMPTY || is_white(was) != white)
        })
    }

    /// Where the piece that left `from` went: a square other than `from`
    /// now holding the same piece code that it did not hold before. None
    /// for promotions.
    pub fn destination_of(&self, piece: i8, from: Square) -> Option<Square> {
        squares().find(|&sq| sq != from && self.after.at(sq) == piece && self.before.at(sq) != piece)
    }
}

/// Every consecutive pair where both boards decoded and the later position
/// carries a move.
pub fn move_pairs<'s>(snapshots: &'s [Snapshot<'_>]) -> Vec<MovePair<'s>> {
    snapshots
        .windows(2)
        .filter_map(|pair| {
            let before = pair[0].board.as_ref()?;
            let after = pair[1].board.as_ref()?;
            let san = pair[1].ctx.last_move()?;
            Some(MovePair {
                before,
                after,
                ctx: pair[1].ctx,
                san,
            })
        })
        .collect()
}

/// Every decoded position that was reached by a move.
pub fn moved_positions<'s>(
    snapshots: &'s [Snapshot<'_>],
) -> Vec<(&'s Board, &'s PositionContext, &'s str)> {
    snapshots
        .iter()
        .filter_map(|snap| {
            let board = snap.board.as_ref()?;
            let san = snap.ctx.last_move()?;
            Some((board, snap.ctx, san))
        })
        .collect()
}

/// Decode all positions of a game once.
pub fn decode_all(positions: &[PositionContext]) -> Vec<Snapshot<'_>> {
    positions.iter().map(Snapshot::decode).collect()
}
