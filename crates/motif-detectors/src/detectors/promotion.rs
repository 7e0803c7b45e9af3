//! Promotion detectors: promotion, promotion_with_check, promotion_with_checkmate

use crate::board::{self, Board};
use crate::context::{moved_positions, PositionContext, Snapshot};
use crate::geometry::{find_king, parse_promotion_destination, piece_attacks_square, piece_notation};
use crate::motif::Motif;
use crate::occurrence::MotifOccurrence;

fn is_promotion(san: &str) -> bool {
    san.contains('=')
}

/// Promoted piece and the enemy king it attacks, as notation, when the piece
/// on the promotion square really gives check.
fn promoted_piece_checks(board: &Board, ctx: &PositionContext, san: &str) -> Option<(String, String)> {
    let dest = parse_promotion_destination(san)?;
    let promoted = board.at(dest);
    let mover_white = ctx.mover_is_white();
    if promoted == board::EMPTY || board::is_white(promoted) != mover_white {
        return None;
    }
    let king = find_king(board, !mover_white)?;
    piece_attacks_square(board, dest, king)
        .then(|| (piece_notation(promoted, dest), piece_notation(board.at(king), king)))
}

pub fn detect_promotions(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    moved_positions(snapshots)
        .into_iter()
        .filter(|(_, _, san)| is_promotion(san))
        .filter_map(|(_, ctx, san)| MotifOccurrence::at(Motif::Promotion, ctx, format!("{san} promotes")))
        .collect()
}

fn detect_checking_promotions(snapshots: &[Snapshot], motif: Motif, suffix: char) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for (board, ctx, san) in moved_positions(snapshots) {
        if !is_promotion(san) || !san.ends_with(suffix) {
            continue;
        }
        let Some((attacker, target)) = promoted_piece_checks(board, ctx, san) else {
            continue;
        };
        let kind = if suffix == '#' { "mate" } else { "check" };
        let description = format!("{attacker} promotes with {kind} on {target}");
        if let Some(occ) = MotifOccurrence::at(motif, ctx, description) {
            occurrences.push(occ.with_pieces(attacker, target).mate(suffix == '#'));
        }
    }

    occurrences
}

/// `=` and `+` in the notation, and the new piece attacks the king from its
/// promotion square. A promotion that uncovers a check from elsewhere does
/// not count.
pub fn detect_promotions_with_check(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    detect_checking_promotions(snapshots, Motif::PromotionWithCheck, '+')
}

pub fn detect_promotions_with_checkmate(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    detect_checking_promotions(snapshots, Motif::PromotionWithCheckmate, '#')
}
