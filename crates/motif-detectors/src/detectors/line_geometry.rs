//! Line geometry detectors: skewer, discovered_attack, discovered_check, interference

use crate::board::{self, Board, Square};
use crate::context::{move_pairs, MovePair, Snapshot};
use crate::geometry::{
    is_check, is_mate, occupied_on_ray, piece_attacks_square, piece_notation, slide_directions,
    slides_along, Direction, ALL_DIRECTIONS,
};
use crate::motif::Motif;
use crate::occurrence::MotifOccurrence;

/// Skewers the `attacker_white` side has on the board: for each of its
/// sliders and each line it attacks along, the front square of a skewer.
fn find_skewers(board: &Board, attacker_white: bool) -> Vec<(Square, Square)> {
    let mut skewers = Vec::new();

    for (from, piece) in board.pieces_of(attacker_white) {
        for &dir in slide_directions(piece) {
            if let Some(front) = skewer_along(board, from, dir) {
                skewers.push((from, front));
            }
        }
    }

    skewers
}

/// Front piece of a skewer on this ray, if any. The two nearest pieces must
/// both be enemies; the front one worth more than the one behind, and the
/// one behind at least a minor piece.
fn skewer_along(board: &Board, from: Square, dir: Direction) -> Option<Square> {
    let attacker = board.at(from);
    let mut pieces = occupied_on_ray(board, from, dir);

    let (front, front_piece) = pieces.next()?;
    if !board::is_enemy(attacker, front_piece) {
        return None;
    }
    let (_, back_piece) = pieces.next()?;
    if !board::is_enemy(attacker, back_piece) {
        return None;
    }

    let back_value = board::value(back_piece);
    (board::value(front_piece) > back_value && back_value >= 2).then_some(front)
}

pub fn detect_skewers(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for snap in snapshots {
        let Some(board) = snap.board.as_ref() else {
            continue;
        };
        for (from, front) in find_skewers(board, snap.ctx.mover_is_white()) {
            let attacker = piece_notation(board.at(from), from);
            let target = piece_notation(board.at(front), front);
            let description = format!("{attacker} skewers {target}");
            if let Some(occ) = MotifOccurrence::at(Motif::Skewer, snap.ctx, description) {
                occurrences.push(occ.with_pieces(attacker, target));
            }
        }
    }

    occurrences
}

/// A line attack opened by a mover piece stepping off it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedAttack {
    /// `Be4->h7`, or just `Pe7` when the destination cannot be traced.
    pub moved_piece: String,
    pub attacker: Square,
    pub attacker_piece: i8,
    pub target: Square,
    pub target_piece: i8,
}

impl RevealedAttack {
    pub fn attacker_notation(&self) -> String {
        piece_notation(self.attacker_piece, self.attacker)
    }

    pub fn target_notation(&self) -> String {
        piece_notation(self.target_piece, self.target)
    }

    pub fn targets_king(&self) -> bool {
        board::kind(self.target_piece) == board::KING
    }
}

/// Every attack revealed by the move in `pair`. For each square the mover
/// vacated, look behind it on each line for a mover slider (the moved piece
/// itself does not count) and in front of it for the first piece; an enemy
/// there is a revealed target.
pub fn find_discovered_attacks(pair: &MovePair) -> Vec<RevealedAttack> {
    let mut revealed = Vec::new();
    let mover_white = pair.mover_is_white();

    for vacated in pair.vacated() {
        let moved = pair.before.at(vacated);
        let dest = pair.destination_of(moved, vacated);
        let moved_piece = match dest {
            Some(to) => format!("{}->{}", piece_notation(moved, vacated), to),
            None => piece_notation(moved, vacated),
        };

        for dir in ALL_DIRECTIONS {
            let Some((behind, slider)) = occupied_on_ray(pair.after, vacated, dir.reversed()).next() else {
                continue;
            };
            if Some(behind) == dest {
                continue;
            }
            if board::is_white(slider) != mover_white || !slides_along(slider, dir) {
                continue;
            }
            let Some((target, target_piece)) = occupied_on_ray(pair.after, vacated, dir).next() else {
                continue;
            };
            if board::is_white(target_piece) != mover_white {
                revealed.push(RevealedAttack {
                    moved_piece: moved_piece.clone(),
                    attacker: behind,
                    attacker_piece: slider,
                    target,
                    target_piece,
                });
            }
        }
    }

    revealed
}

pub fn detect_discovered_attacks(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for pair in move_pairs(snapshots) {
        for ra in find_discovered_attacks(&pair) {
            let description = format!(
                "{} uncovers {} on {}",
                ra.moved_piece,
                ra.attacker_notation(),
                ra.target_notation()
            );
            if let Some(occ) = MotifOccurrence::at(Motif::DiscoveredAttack, pair.ctx, description) {
                occurrences.push(
                    occ.with_moved_piece(ra.moved_piece.clone())
                        .with_pieces(ra.attacker_notation(), ra.target_notation())
                        .discovered(),
                );
            }
        }
    }

    occurrences
}

pub fn detect_discovered_checks(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for pair in move_pairs(snapshots) {
        if !is_check(pair.san) {
            continue;
        }
        for ra in find_discovered_attacks(&pair) {
            if !ra.targets_king() {
                continue;
            }
            let description = format!("{} gives discovered check from {}", ra.moved_piece, ra.attacker_notation());
            if let Some(occ) = MotifOccurrence::at(Motif::DiscoveredCheck, pair.ctx, description) {
                occurrences.push(
                    occ.with_moved_piece(ra.moved_piece.clone())
                        .with_pieces(ra.attacker_notation(), ra.target_notation())
                        .discovered()
                        .mate(is_mate(pair.san)),
                );
            }
        }
    }

    occurrences
}

/// Enemy slider whose line ran through `square` in `before` and continued
/// past it.
fn cut_line(before: &Board, square: Square, mover_white: bool) -> Option<Square> {
    before
        .pieces_of(!mover_white)
        .filter(|&(_, p)| board::is_slider(p))
        .find(|&(from, _)| {
            piece_attacks_square(before, from, square)
                && Direction::between(from, square)
                    .and_then(|d| square.offset(d.dr, d.dc))
                    .is_some()
        })
        .map(|(from, _)| from)
}

/// A mover piece lands on an empty square that an enemy slider's line ran
/// through. One occurrence per move.
pub fn detect_interference(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for pair in move_pairs(snapshots) {
        let mover_white = pair.mover_is_white();
        let hit = board::squares()
            .filter(|&sq| {
                let now = pair.after.at(sq);
                pair.before.at(sq) == board::EMPTY && now != board::EMPTY && board::is_white(now) == mover_white
            })
            .find_map(|sq| cut_line(pair.before, sq, mover_white).map(|slider| (sq, slider)));

        if let Some((square, slider)) = hit {
            let blocker = piece_notation(pair.after.at(square), square);
            let cut = piece_notation(pair.before.at(slider), slider);
            let description = format!("{blocker} interferes with {cut}");
            if let Some(occ) = MotifOccurrence::at(Motif::Interference, pair.ctx, description) {
                occurrences.push(occ.with_pieces(blocker, cut));
            }
        }
    }

    occurrences
}
