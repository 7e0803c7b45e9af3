//! Check detectors: check, checkmate, double_check

use crate::context::{moved_positions, Snapshot};
use crate::geometry::{count_attackers, find_king, is_check, is_mate, piece_notation};
use crate::motif::Motif;
use crate::occurrence::MotifOccurrence;

pub fn detect_checks(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    moved_positions(snapshots)
        .into_iter()
        .filter(|(_, _, san)| is_check(san))
        .filter_map(|(_, ctx, san)| MotifOccurrence::at(Motif::Check, ctx, format!("{san} gives check")))
        .collect()
}

pub fn detect_checkmates(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    moved_positions(snapshots)
        .into_iter()
        .filter(|(_, _, san)| is_mate(san))
        .filter_map(|(_, ctx, san)| {
            MotifOccurrence::at(Motif::Checkmate, ctx, format!("{san} is checkmate")).map(|occ| occ.mate(true))
        })
        .collect()
}

/// The checked king is attacked by two or more pieces at once.
pub fn detect_double_checks(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for (board, ctx, san) in moved_positions(snapshots) {
        if !is_check(san) {
            continue;
        }
        let Some(king) = find_king(board, ctx.white_to_move) else {
            continue;
        };
        if count_attackers(board, king, ctx.mover_is_white()) < 2 {
            continue;
        }
        let target = piece_notation(board.at(king), king);
        if let Some(mut occ) = MotifOccurrence::at(Motif::DoubleCheck, ctx, format!("{san} is a double check")) {
            occ.target = Some(target);
            occurrences.push(occ.mate(is_mate(san)));
        }
    }

    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::fixtures::{position, run};

    #[test]
    fn test_check_and_mate_follow_notation() {
        let game = [
            position("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2", Some("e5")),
            position("rnbqkbnr/pppp1ppp/8/4p3/4P3/5Q2/PPPP1PPP/RNB1KBNR b KQkq - 1 2", Some("Qf3")),
            position("4k3/8/8/8/8/8/8/4K2R b - - 0 30", Some("Rh8+")),
            position("4k2R/8/4K3/8/8/8/8/8 b - - 0 40", Some("Rh8#")),
        ];
        let checks = run(detect_checks, &game);
        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].ply, 59);

        let mates = run(detect_checkmates, &game);
        assert_eq!(mates.len(), 1);
        assert!(mates[0].is_mate);
        assert_eq!(mates[0].ply, 79);
    }

    #[test]
    fn test_double_check_with_rook_and_bishop() {
        let game = [position("k7/8/8/3B4/8/8/8/R6K b - - 1 50", Some("Bd5+"))];
        let found = run(detect_double_checks, &game);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].target.as_deref(), Some("ka8"));
    }

    #[test]
    fn test_single_check_is_not_double() {
        let game = [position("k7/8/8/3B4/8/8/8/1R5K b - - 1 50", Some("Bd5+"))];
        assert!(run(detect_double_checks, &game).is_empty());
    }

    #[test]
    fn test_undecodable_position_is_skipped() {
        let game = [position("not-a-board b - - 1 50", Some("Bd5+"))];
        assert!(run(detect_checks, &game).is_empty());
        assert!(run(detect_double_checks, &game).is_empty());
    }
}
