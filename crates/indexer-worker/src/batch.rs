//! Batch reanalysis: replay, validate and index games in parallel.

use std::sync::Arc;

use chess_core::GameRecord;
use motif_detectors::{ply_for, run_selected, Board, GameFeatures, Motif, PositionContext};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::WorkerConfig;
use crate::error::WorkerError;
use crate::sink::FeatureSink;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReanalysisSummary {
    pub processed: usize,
    pub failed: usize,
}

impl ReanalysisSummary {
    pub fn total(&self) -> usize {
        self.processed + self.failed
    }
}

/// Reject sequences the detectors would silently skip over: every placement
/// must decode and ply must strictly increase.
pub fn validate_positions(positions: &[PositionContext]) -> Result<(), WorkerError> {
    let mut previous: Option<i64> = None;

    for (index, ctx) in positions.iter().enumerate() {
        Board::decode(&ctx.fen).map_err(|source| WorkerError::InvalidPosition { index, source })?;

        let ply = ply_for(ctx.move_number, ctx.mover_is_white());
        if let Some(previous) = previous {
            if ply <= previous {
                return Err(WorkerError::PlyOrder { index, ply, previous });
            }
        }
        previous = Some(ply);
    }

    Ok(())
}

/// Replay, validate and run the enabled detectors over one game.
pub fn analyze_record(record: &GameRecord, motifs: &[Motif]) -> Result<GameFeatures, WorkerError> {
    let positions = record.to_positions()?;
    validate_positions(&positions)?;
    Ok(run_selected(&positions, motifs))
}

/// Index `games` into `sink`, `config.batch_size` games at a time.
///
/// Records are pulled lazily: the next batch is read only after the previous
/// one has been written. A failing game is logged and counted; it never
/// aborts the run. Sink errors do.
pub async fn reanalyze<I, S>(games: I, config: &WorkerConfig, sink: &mut S) -> Result<ReanalysisSummary, WorkerError>
where
    I: IntoIterator<Item = GameRecord>,
    S: FeatureSink,
{
    let motifs: Arc<[Motif]> = config.enabled_motifs().into();
    let semaphore = Arc::new(Semaphore::new(config.max_workers.max(1)));
    let batch_size = config.batch_size.max(1);

    let mut summary = ReanalysisSummary::default();
    let mut games = games.into_iter();
    let mut batch_index = 0;

    loop {
        let batch: Vec<GameRecord> = games.by_ref().take(batch_size).collect();
        if batch.is_empty() {
            break;
        }
        batch_index += 1;

        let mut handles: Vec<(String, JoinHandle<Result<GameFeatures, WorkerError>>)> =
            Vec::with_capacity(batch.len());
        for record in batch {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| WorkerError::Task(e.to_string()))?;
            let motifs = motifs.clone();
            let game_id = record.game_id.clone();

            let handle = tokio::task::spawn_blocking(move || {
                let _permit = permit; // Hold until done
                analyze_record(&record, &motifs)
            });
            handles.push((game_id, handle));
        }

        // Awaited in input order so the sink sees games as they came in
        for (game_id, handle) in handles {
            match handle.await {
                Ok(Ok(features)) => {
                    debug!(game_id = %game_id, occurrences = features.occurrences.len(), "Game indexed");
                    sink.replace(&game_id, &features)?;
                    summary.processed += 1;
                }
                Ok(Err(e)) => {
                    warn!(game_id = %game_id, error = %e, "Skipping game");
                    summary.failed += 1;
                }
                Err(e) => {
                    error!(game_id = %game_id, error = %e, "Analysis task panicked");
                    summary.failed += 1;
                }
            }
        }

        info!(
            batch = batch_index,
            done = summary.total(),
            failed = summary.failed,
            "Batch complete"
        );
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    fn config(batch_size: usize) -> WorkerConfig {
        WorkerConfig {
            batch_size,
            max_workers: 2,
            ..WorkerConfig::default()
        }
    }

    fn moves(id: &str, san: &[&str]) -> GameRecord {
        GameRecord::from_moves(id, san.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_validate_rejects_bad_placement() {
        let positions = vec![
            PositionContext::new("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1", 0, true, None),
            PositionContext::new("rnbqkbnr/ppXppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1", 1, false, Some("e4")),
        ];
        let err = validate_positions(&positions).unwrap_err();
        assert!(matches!(err, WorkerError::InvalidPosition { index: 1, .. }));
    }

    #[test]
    fn test_validate_rejects_repeated_ply() {
        let fen = "4k3/8/8/8/8/8/8/4K3";
        let positions = vec![
            PositionContext::new(fen, 3, false, Some("Kd1")),
            PositionContext::new(fen, 3, false, Some("Ke1")),
        ];
        let err = validate_positions(&positions).unwrap_err();
        assert!(matches!(err, WorkerError::PlyOrder { index: 1, ply: 5, previous: 5 }));
    }

    #[test]
    fn test_analyze_record_replays_moves() {
        let features = analyze_record(&moves("g", &["f3", "e5", "g4", "Qh4#"]), &Motif::ALL).unwrap();
        assert_eq!(features.num_moves, 3);
        assert!(features.has(Motif::Checkmate));
        let mate = features
            .occurrences
            .iter()
            .find(|o| o.motif == Motif::Checkmate)
            .unwrap();
        assert_eq!(mate.ply, 4);
    }

    #[tokio::test]
    async fn test_failures_are_counted_not_fatal() {
        let games = vec![
            moves("ok-1", &["e4", "e5"]),
            moves("illegal", &["e4", "e4"]),
            GameRecord {
                game_id: "empty".to_string(),
                ..GameRecord::default()
            },
            moves("ok-2", &["d4", "d5", "c4"]),
            GameRecord::from_pgn("ok-3", "1. f3 e5 2. g4 Qh4# 0-1"),
        ];

        let mut sink = MemorySink::new();
        let summary = reanalyze(games, &config(2), &mut sink).await.unwrap();

        assert_eq!(summary, ReanalysisSummary { processed: 3, failed: 2 });
        assert_eq!(sink.games.len(), 3);
        assert!(sink.get("illegal").is_none());
        assert!(sink.get("ok-3").unwrap().has(Motif::Checkmate));
    }

    #[tokio::test]
    async fn test_disabled_motifs_are_not_reported() {
        let mut cfg = config(10);
        cfg.disabled_motifs = vec![Motif::Check, Motif::Checkmate];

        let mut sink = MemorySink::new();
        reanalyze(vec![moves("g", &["f3", "e5", "g4", "Qh4#"])], &cfg, &mut sink)
            .await
            .unwrap();

        let features = sink.get("g").unwrap();
        assert!(!features.has(Motif::Check));
        assert!(!features.has(Motif::Checkmate));
    }

    #[tokio::test]
    async fn test_empty_input() {
        let mut sink = MemorySink::new();
        let summary = reanalyze(Vec::new(), &config(5), &mut sink).await.unwrap();
        assert_eq!(summary.total(), 0);
        assert!(sink.games.is_empty());
    }
}
