//! Worker error types

use chess_core::ReplayError;
use motif_detectors::{BoardError, UnknownMotif};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WorkerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: {0}")]
    UnknownMotif(#[from] UnknownMotif),

    #[error("Replay error: {0}")]
    Replay(#[from] ReplayError),

    #[error("Position {index} is not a valid placement: {source}")]
    InvalidPosition { index: usize, source: BoardError },

    #[error("Position {index} does not advance the ply ({ply} after {previous})")]
    PlyOrder { index: usize, ply: i64, previous: i64 },

    #[error("Analysis task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
