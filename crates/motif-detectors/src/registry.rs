//! Detector registry and per-game aggregation.

use tracing::debug;

use crate::context::{decode_all, PositionContext, Snapshot};
use crate::detectors::{attacks, checks, line_geometry, mate_patterns, material, pins, promotion, zugzwang};
use crate::motif::Motif;
use crate::occurrence::{GameFeatures, MotifOccurrence};

/// A stateless detector over one game's decoded positions.
pub type DetectFn = fn(&[Snapshot]) -> Vec<MotifOccurrence>;

/// Every detector, in the order their occurrences are reported.
pub const DETECTORS: &[(Motif, DetectFn)] = &[
    (Motif::Pin, pins::detect_pins),
    (Motif::CrossPin, pins::detect_cross_pins),
    (Motif::Fork, attacks::detect_forks),
    (Motif::Skewer, line_geometry::detect_skewers),
    (Motif::Attack, attacks::detect_attacks),
    (Motif::DiscoveredAttack, line_geometry::detect_discovered_attacks),
    (Motif::DiscoveredCheck, line_geometry::detect_discovered_checks),
    (Motif::Check, checks::detect_checks),
    (Motif::Checkmate, checks::detect_checkmates),
    (Motif::Promotion, promotion::detect_promotions),
    (Motif::PromotionWithCheck, promotion::detect_promotions_with_check),
    (Motif::PromotionWithCheckmate, promotion::detect_promotions_with_checkmate),
    (Motif::BackRankMate, mate_patterns::detect_back_rank_mates),
    (Motif::SmotheredMate, mate_patterns::detect_smothered_mates),
    (Motif::Sacrifice, material::detect_sacrifices),
    (Motif::Zugzwang, zugzwang::detect_zugzwang),
    (Motif::DoubleCheck, checks::detect_double_checks),
    (Motif::Interference, line_geometry::detect_interference),
    (Motif::OverloadedPiece, attacks::detect_overloaded_pieces),
];

pub fn detector_for(motif: Motif) -> Option<DetectFn> {
    DETECTORS
        .iter()
        .find(|(m, _)| *m == motif)
        .map(|(_, detect)| *detect)
}

fn run_detectors(positions: &[PositionContext], enabled: impl Fn(Motif) -> bool) -> GameFeatures {
    let snapshots = decode_all(positions);
    let mut occurrences = Vec::new();

    for &(motif, detect) in DETECTORS {
        if !enabled(motif) {
            continue;
        }
        let found = detect(&snapshots);
        if !found.is_empty() {
            debug!(motif = motif.tag(), count = found.len(), "detector matched");
        }
        occurrences.extend(found);
    }

    let num_moves = positions.last().map_or(0, |p| p.move_number);
    GameFeatures::new(num_moves, occurrences)
}

/// Run every registered detector over one game.
pub fn run_all(positions: &[PositionContext]) -> GameFeatures {
    run_detectors(positions, |_| true)
}

/// Run only the detectors for `motifs`. Registration order is kept
/// whatever order `motifs` comes in.
pub fn run_selected(positions: &[PositionContext], motifs: &[Motif]) -> GameFeatures {
    run_detectors(positions, |m| motifs.contains(&m))
}
