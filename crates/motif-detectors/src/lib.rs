//! Tactical motif detection over replayed games.
//!
//! A game arrives as a list of [`PositionContext`]s (one per ply plus the
//! start). Each placement is decoded once into a [`Board`], then every
//! detector in [`registry::DETECTORS`] scans the whole sequence. The result
//! is a [`GameFeatures`]: all occurrences plus one flag per motif.

pub mod board;
pub mod context;
pub mod detectors;
pub mod geometry;
pub mod motif;
pub mod occurrence;
pub mod registry;

pub use board::{Board, BoardError, Square};
pub use context::{PositionContext, Snapshot};
pub use motif::{Motif, UnknownMotif, MOTIF_TAGS};
pub use occurrence::{ply_for, GameFeatures, MotifFlags, MotifOccurrence, PinType, Side};
pub use registry::{run_all, run_selected};
