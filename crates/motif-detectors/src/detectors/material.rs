//! Material detectors: sacrifice

use crate::board::{self, Square};
use crate::context::{move_pairs, MovePair, Snapshot};
use crate::geometry::piece_notation;
use crate::motif::Motif;
use crate::occurrence::MotifOccurrence;

/// Capture square where a mover piece took something worth less than itself.
fn losing_capture(pair: &MovePair) -> Option<Square> {
    let mover_white = pair.mover_is_white();
    board::squares().find(|&sq| {
        let was = pair.before.at(sq);
        let now = pair.after.at(sq);
        was != board::EMPTY
            && now != board::EMPTY
            && board::is_white(was) != mover_white
            && board::is_white(now) == mover_white
            && board::value(now) > board::value(was)
    })
}

pub fn detect_sacrifices(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for pair in move_pairs(snapshots) {
        let Some(sq) = losing_capture(&pair) else {
            continue;
        };
        let attacker = piece_notation(pair.after.at(sq), sq);
        let target = piece_notation(pair.before.at(sq), sq);
        let description = format!("{attacker} takes {target}");
        if let Some(occ) = MotifOccurrence::at(Motif::Sacrifice, pair.ctx, description) {
            occurrences.push(occ.with_pieces(attacker, target));
        }
    }

    occurrences
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::fixtures::{pair, run};

    #[test]
    fn test_queen_takes_pawn() {
        let game = pair("4k3/8/8/4Q3/4p3/8/8/4K3 w - - 0 27", "4k3/8/8/8/4Q3/8/8/4K3 b - - 0 27", "Qxe4+");
        let found = run(detect_sacrifices, &game);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].attacker.as_deref(), Some("Qe4"));
        assert_eq!(found[0].target.as_deref(), Some("pe4"));
        assert_eq!(found[0].ply, 53);
    }

    #[test]
    fn test_even_or_winning_capture_is_not_sacrifice() {
        let even = pair("4k3/8/8/4R3/4r3/8/8/4K3 w - - 0 27", "4k3/8/8/8/4R3/8/8/4K3 b - - 0 27", "Rxe4+");
        assert!(run(detect_sacrifices, &even).is_empty());

        let winning = pair("4k3/8/8/8/3q4/4P3/8/4K3 w - - 0 27", "4k3/8/8/8/3P4/8/8/4K3 b - - 0 27", "exd4");
        assert!(run(detect_sacrifices, &winning).is_empty());
    }

    #[test]
    fn test_quiet_move_is_not_sacrifice() {
        let game = pair("4k3/8/8/8/8/8/8/3QK3 w - - 0 5", "4k3/8/8/8/8/8/3Q4/4K3 b - - 1 5", "Qd2");
        assert!(run(detect_sacrifices, &game).is_empty());
    }
}
