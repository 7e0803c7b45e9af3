//! Zugzwang heuristic.
//!
//! Not a solver: it only looks for simple endgames where the side to move
//! has no pawn push and no minor or rook step available. King moves and
//! legality are ignored.

use crate::board::{self, Board, BISHOP, EMPTY, KING, KNIGHT, PAWN, QUEEN, ROOK};
use crate::context::{moved_positions, Snapshot};
use crate::geometry::{knight_squares, ray, slide_directions};
use crate::motif::Motif;
use crate::occurrence::{MotifOccurrence, Side};

const ENDGAME_MAX_PIECES: usize = 8;

fn is_simple_endgame(board: &Board) -> bool {
    let mut total = 0;
    for (_, piece) in board.pieces() {
        if board::kind(piece) == QUEEN {
            return false;
        }
        total += 1;
    }
    total <= ENDGAME_MAX_PIECES
}

/// Can the piece on `sq` reach some empty square in one step?
fn has_step(board: &Board, sq: board::Square, piece: i8) -> bool {
    match board::kind(piece) {
        PAWN => {
            let forward = if board::is_white(piece) { -1 } else { 1 };
            sq.offset(forward, 0).is_some_and(|ahead| board.at(ahead) == EMPTY)
        }
        KNIGHT => knight_squares(sq).any(|to| board.at(to) == EMPTY),
        BISHOP | ROOK => slide_directions(piece)
            .iter()
            .any(|&dir| ray(board, sq, dir).next().is_some_and(|(_, p)| p == EMPTY)),
        _ => false,
    }
}

fn is_starved(board: &Board, white: bool) -> bool {
    board
        .pieces_of(white)
        .filter(|&(_, p)| board::kind(p) != KING)
        .all(|(sq, p)| !has_step(board, sq, p))
}

pub fn detect_zugzwang(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for (board, ctx, _) in moved_positions(snapshots) {
        if !is_simple_endgame(board) || !is_starved(board, ctx.white_to_move) {
            continue;
        }
        let stuck = Side::from_white(ctx.white_to_move);
        let description = format!("{} to move with no free piece moves (heuristic)", stuck.as_str());
        if let Some(occ) = MotifOccurrence::at(Motif::Zugzwang, ctx, description) {
            occurrences.push(occ);
        }
    }

    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::fixtures::{position, run};

    #[test]
    fn test_blocked_pawns_king_only_moves() {
        let game = [position("4k3/8/8/4p3/4P3/8/8/4K3 w - - 2 40", Some("Ke8"))];
        assert_eq!(run(detect_zugzwang, &game).len(), 1);
    }

    #[test]
    fn test_free_pawn_push_is_not_zugzwang() {
        let game = [position("4k3/8/8/4p3/4P3/8/P7/4K3 w - - 2 40", Some("Ke8"))];
        assert!(run(detect_zugzwang, &game).is_empty());
    }

    #[test]
    fn test_mobile_rook_is_not_zugzwang() {
        let game = [position("4k3/8/8/4p3/4P3/8/8/R3K3 w - - 2 40", Some("Ke8"))];
        assert!(run(detect_zugzwang, &game).is_empty());
    }

    #[test]
    fn test_queen_on_board_is_not_an_endgame() {
        let game = [position("4k3/8/8/4p3/4P3/8/8/q3K3 w - - 2 40", Some("Qa1"))];
        assert!(run(detect_zugzwang, &game).is_empty());
    }

    #[test]
    fn test_crowded_board_is_skipped() {
        let game = [position("4k3/pppppppp/8/8/8/8/PPPPPPPP/4K3 w - - 2 40", Some("Ke8"))];
        assert!(run(detect_zugzwang, &game).is_empty());
    }

    #[test]
    fn test_start_position_is_skipped() {
        let game = [position("4k3/8/8/4p3/4P3/8/8/4K3 w - - 0 1", None)];
        assert!(run(detect_zugzwang, &game).is_empty());
    }
}
