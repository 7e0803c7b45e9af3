//! Attack detectors: attack, fork, overloaded_piece

use crate::board::{self, Board, Square, KING, QUEEN};
use crate::context::{move_pairs, moved_positions, MovePair, Snapshot};
use crate::detectors::line_geometry::find_discovered_attacks;
use crate::geometry::{attacked_enemies, count_attackers, is_castling, is_mate, piece_attacks_square, piece_notation};
use crate::motif::Motif;
use crate::occurrence::MotifOccurrence;

/// Minimum value for a piece to count as a real target (knight and up).
const SIGNIFICANT_VALUE: i32 = 2;

/// The moved piece's landing square and the enemies it attacks from there.
/// None for castling or when the move cannot be traced on the boards.
fn moved_piece_attacks(pair: &MovePair) -> Option<(Square, Vec<(Square, i8)>)> {
    if is_castling(pair.san) || pair.vacated().is_empty() {
        return None;
    }
    let dest = pair.arrival()?;
    Some((dest, attacked_enemies(pair.after, dest)))
}

/// Kings and queens are always kept. When two or more targets are worth at
/// least a minor piece, all of those are kept as well.
fn significant_targets(targets: &[(Square, i8)]) -> Vec<(Square, i8)> {
    let mut kept: Vec<(Square, i8)> = targets
        .iter()
        .copied()
        .filter(|&(_, p)| matches!(board::kind(p), KING | QUEEN))
        .collect();

    let valuable = targets
        .iter()
        .filter(|&&(_, p)| board::value(p) >= SIGNIFICANT_VALUE)
        .count();
    if valuable >= 2 {
        for &target in targets {
            if board::value(target.1) >= SIGNIFICANT_VALUE && !kept.contains(&target) {
                kept.push(target);
            }
        }
    }

    kept
}

/// Direct attacks by the moved piece plus every attack the move uncovered.
pub fn detect_attacks(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for pair in move_pairs(snapshots) {
        let mating = is_mate(pair.san);

        if let Some((dest, targets)) = moved_piece_attacks(&pair) {
            let attacker = piece_notation(pair.after.at(dest), dest);
            for (sq, piece) in significant_targets(&targets) {
                let target = piece_notation(piece, sq);
                let description = format!("{attacker} attacks {target}");
                if let Some(occ) = MotifOccurrence::at(Motif::Attack, pair.ctx, description) {
                    occurrences.push(
                        occ.with_moved_piece(attacker.clone())
                            .with_pieces(attacker.clone(), target)
                            .mate(mating && board::kind(piece) == KING),
                    );
                }
            }
        }

        for ra in find_discovered_attacks(&pair) {
            let description = format!("{} uncovers {} on {}", ra.moved_piece, ra.attacker_notation(), ra.target_notation());
            if let Some(occ) = MotifOccurrence::at(Motif::Attack, pair.ctx, description) {
                occurrences.push(
                    occ.with_moved_piece(ra.moved_piece.clone())
                        .with_pieces(ra.attacker_notation(), ra.target_notation())
                        .discovered()
                        .mate(mating && ra.targets_king()),
                );
            }
        }
    }

    occurrences
}

/// The moved piece hits two or more pieces worth at least a minor piece.
pub fn detect_forks(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for pair in move_pairs(snapshots) {
        let Some((dest, targets)) = moved_piece_attacks(&pair) else {
            continue;
        };
        let forked: Vec<(Square, i8)> = targets
            .into_iter()
            .filter(|&(_, p)| board::value(p) >= SIGNIFICANT_VALUE)
            .collect();
        if forked.len() < 2 {
            continue;
        }

        // most valuable, first in scan order on ties
        let Some(&(best_sq, best)) = forked
            .iter()
            .rev()
            .max_by_key(|&&(_, p)| board::value(p))
        else {
            continue;
        };

        let attacker = piece_notation(pair.after.at(dest), dest);
        let names: Vec<String> = forked.iter().map(|&(sq, p)| piece_notation(p, sq)).collect();
        let description = format!("{attacker} forks {}", names.join(", "));
        if let Some(occ) = MotifOccurrence::at(Motif::Fork, pair.ctx, description) {
            occurrences.push(
                occ.with_moved_piece(attacker.clone())
                    .with_pieces(attacker, piece_notation(best, best_sq))
                    .mate(is_mate(pair.san) && board::kind(best) == KING),
            );
        }
    }

    occurrences
}

/// First defender (scan order) guarding two or more of its side's attacked
/// pieces, or None.
fn find_overloaded(board: &Board, defender_white: bool) -> Option<Square> {
    let attacked: Vec<Square> = board
        .pieces_of(defender_white)
        .filter(|&(sq, _)| count_attackers(board, sq, !defender_white) > 0)
        .map(|(sq, _)| sq)
        .collect();
    if attacked.len() < 2 {
        return None;
    }

    board
        .pieces_of(defender_white)
        .map(|(sq, _)| sq)
        .find(|&defender| {
            attacked
                .iter()
                .filter(|&&sq| sq != defender && piece_attacks_square(board, defender, sq))
                .count()
                >= 2
        })
}

pub fn detect_overloaded_pieces(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for (board, ctx, _) in moved_positions(snapshots) {
        let Some(defender) = find_overloaded(board, ctx.white_to_move) else {
            continue;
        };
        let target = piece_notation(board.at(defender), defender);
        let description = format!("{target} is overloaded");
        if let Some(mut occ) = MotifOccurrence::at(Motif::OverloadedPiece, ctx, description) {
            occ.target = Some(target);
            occurrences.push(occ);
        }
    }

    occurrences
}
