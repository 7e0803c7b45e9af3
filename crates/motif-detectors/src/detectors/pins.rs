//! Pin detectors: pin, cross_pin

use std::collections::HashMap;

use crate::board::{self, Board, Square, BISHOP, KING, QUEEN, ROOK};
use crate::context::Snapshot;
use crate::geometry::{find_king, occupied_on_ray, piece_notation, slides_along, Direction, ALL_DIRECTIONS};
use crate::motif::Motif;
use crate::occurrence::{MotifOccurrence, PinType};

/// A pinned piece together with what pins it and what it shields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinLine {
    pub pinner: Square,
    pub pinned: Square,
    /// The king (absolute) or queen (relative) behind the pinned piece.
    pub anchor: Square,
    pub dir: Direction,
    pub pin_type: PinType,
}

/// From `anchor`, is the first piece on the ray a friend and the next one an
/// enemy slider that attacks along the ray?
fn pin_along(board: &Board, anchor: Square, dir: Direction, queen_pinners: bool) -> Option<(Square, Square)> {
    let owner = board.at(anchor);
    let mut pieces = occupied_on_ray(board, anchor, dir);
    let (pinned, shield) = pieces.next()?;
    if board::is_enemy(owner, shield) || board::kind(shield) == KING {
        return None;
    }
    let (pinner, attacker) = pieces.next()?;
    if !board::is_enemy(owner, attacker) || !slides_along(attacker, dir) {
        return None;
    }
    if !queen_pinners && board::kind(attacker) == QUEEN {
        return None;
    }
    Some((pinner, pinned))
}

/// All pins against the side `defender_white`: absolute pins to its king,
/// then relative pins to its queen(s) by enemy rooks and bishops.
pub fn find_pins(board: &Board, defender_white: bool) -> Vec<PinLine> {
    let mut pins = Vec::new();

    if let Some(king) = find_king(board, defender_white) {
        for dir in ALL_DIRECTIONS {
            if let Some((pinner, pinned)) = pin_along(board, king, dir, true) {
                pins.push(PinLine {
                    pinner,
                    pinned,
                    anchor: king,
                    dir,
                    pin_type: PinType::Absolute,
                });
            }
        }
    }

    let queens: Vec<Square> = board
        .pieces_of(defender_white)
        .filter(|&(_, p)| board::kind(p) == QUEEN)
        .map(|(sq, _)| sq)
        .collect();
    for queen in queens {
        for dir in ALL_DIRECTIONS {
            if let Some((pinner, pinned)) = pin_along(board, queen, dir, false) {
                debug_assert!(matches!(board::kind(board.at(pinner)), ROOK | BISHOP));
                pins.push(PinLine {
                    pinner,
                    pinned,
                    anchor: queen,
                    dir,
                    pin_type: PinType::Relative,
                });
            }
        }
    }

    pins
}

pub fn detect_pins(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for snap in snapshots {
        let Some(board) = snap.board.as_ref() else {
            continue;
        };
        for pin in find_pins(board, snap.ctx.white_to_move) {
            let attacker = piece_notation(board.at(pin.pinner), pin.pinner);
            let target = piece_notation(board.at(pin.pinned), pin.pinned);
            let anchor = piece_notation(board.at(pin.anchor), pin.anchor);
            let description = format!("{attacker} pins {target} to {anchor}");
            if let Some(occ) = MotifOccurrence::at(Motif::Pin, snap.ctx, description) {
                occurrences.push(occ.with_pieces(attacker, target).pin(pin.pin_type));
            }
        }
    }

    occurrences
}

/// A single piece pinned along two different lines at once, e.g. to its king
/// on the file and to its queen on a diagonal.
pub fn detect_cross_pins(snapshots: &[Snapshot]) -> Vec<MotifOccurrence> {
    let mut occurrences = Vec::new();

    for snap in snapshots {
        let Some(board) = snap.board.as_ref() else {
            continue;
        };

        let mut by_square: HashMap<Square, Vec<PinLine>> = HashMap::new();
        for pin in find_pins(board, snap.ctx.white_to_move) {
            by_square.entry(pin.pinned).or_default().push(pin);
        }

        let mut crossed: Vec<(Square, Vec<PinLine>)> = by_square
            .into_iter()
            .filter(|(_, lines)| {
                lines.iter().any(|a| {
                    lines
                        .iter()
                        .any(|b| a.dir != b.dir && a.dir != b.dir.reversed())
                })
            })
            .collect();
        crossed.sort_by_key(|(sq, _)| *sq);

        for (pinned, lines) in crossed {
            let target = piece_notation(board.at(pinned), pinned);
            let pinners: Vec<String> = lines
                .iter()
                .map(|l| piece_notation(board.at(l.pinner), l.pinner))
                .collect();
            let description = format!("{target} cross-pinned by {}", pinners.join(" and "));
            if let Some(occ) = MotifOccurrence::at(Motif::CrossPin, snap.ctx, description) {
                occurrences.push(occ.with_pieces(pinners[0].clone(), target));
            }
        }
    }

    occurrences
}
