//! Mate pattern detectors: back_rank_mate, smothered_mate

use crate::board::{self, Board, Square, KNIGHT};
use crate::context::{moved_positions, Snapshot};
use crate::geometry::{find_king, is_mate, knight_squares, piece_attacks_square, piece_notation, ALL_DIRECTIONS};
use crate::motif::Motif;
use crate::occurrence::MotifOccurrence;

/// Mated king on its own first rank with at least one of the squares
/// directly in front of it taken by its own piece.
fn is_back_rank_mate(board: &Board, king: Square, loser_white: bool) -> bool {
    let (back_row, forward) = if loser_white { (7, -1) } else { (0, 1) };
    if king.row != back_row {
        return false;
    }

    (-1..=1)
        .filter_map(|dc| king.offset(forward, dc))
        .any(|sq| {
            let piece = board.at(sq);
            piece != board::EMPTY && board::is_white(piece) == loser_white
        })
}

pub fn detect_back_rank_mates(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for (board, ctx, san) in moved_positions(snapshots) {
        if !is_mate(san) {
            continue;
        }
        let loser_white = ctx.white_to_move;
        let Some(king) = find_king(board, loser_white) else {
            continue;
        };
        if !is_back_rank_mate(board, king, loser_white) {
            continue;
        }
        let target = piece_notation(board.at(king), king);
        if let Some(mut occ) = MotifOccurrence::at(Motif::BackRankMate, ctx, format!("{san} mates {target} on the back rank")) {
            occ.target = Some(target);
            occurrences.push(occ.mate(true));
        }
    }

    occurrences
}

/// Mating knight, if the king is mated by a knight and boxed in by its own
/// pieces (or the board edge) on every side.
fn smothering_knight(board: &Board, king: Square, loser_white: bool) -> Option<Square> {
    let enemy_knight = if loser_white { -KNIGHT } else { KNIGHT };
    let knight = knight_squares(king)
        .find(|&sq| board.at(sq) == enemy_knight && piece_attacks_square(board, sq, king))?;

    let boxed_in = ALL_DIRECTIONS
        .iter()
        .filter_map(|d| king.offset(d.dr, d.dc))
        .all(|sq| {
            let piece = board.at(sq);
            piece != board::EMPTY && board::is_white(piece) == loser_white
        });

    boxed_in.then_some(knight)
}

pub fn detect_smothered_mates(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for (board, ctx, san) in moved_positions(snapshots) {
        if !is_mate(san) {
            continue;
        }
        let loser_white = ctx.white_to_move;
        let Some(king) = find_king(board, loser_white) else {
            continue;
        };
        let Some(knight) = smothering_knight(board, king, loser_white) else {
            continue;
        };
        let attacker = piece_notation(board.at(knight), knight);
        let target = piece_notation(board.at(king), king);
        let description = format!("{attacker} smothers {target}");
        if let Some(occ) = MotifOccurrence::at(Motif::SmotheredMate, ctx, description) {
            occurrences.push(occ.with_pieces(attacker, target).mate(true));
        }
    }

    occurrences
}
