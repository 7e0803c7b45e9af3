//! Tactical detectors, grouped by the geometry they share.
//!
//! Every detector has the same shape: it reads the decoded snapshots of one
//! game and returns its occurrences in chronological order. Positions whose
//! board failed to decode are skipped, as is any move pair touching one.

pub mod attacks;
pub mod checks;
pub mod line_geometry;
pub mod mate_patterns;
pub mod material;
pub mod pins;
pub mod promotion;
pub mod zugzwang;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::context::{decode_all, PositionContext, Snapshot};
    use crate::occurrence::MotifOccurrence;

    /// Context from a full FEN; side to move and move number come from its
    /// second and sixth fields.
    pub fn position(fen: &str, last_move: Option<&str>) -> PositionContext {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        let white_to_move = fields.get(1).map_or(true, |side| *side == "w");
        let move_number = fields.get(5).and_then(|n| n.parse().ok()).unwrap_or(1);
        PositionContext::new(fen, move_number, white_to_move, last_move)
    }

    /// Two-position game: `before`, then `san` leading to `after`.
    pub fn pair(before: &str, after: &str, san: &str) -> Vec<PositionContext> {
        vec![position(before, None), position(after, Some(san))]
    }

    pub fn run(detect: fn(&[Snapshot]) -> Vec<MotifOccurrence>, positions: &[PositionContext]) -> Vec<MotifOccurrence> {
        let snapshots = decode_all(positions);
        detect(&snapshots)
    }
}
