/// End-to-end batch reanalysis through the indexer worker.
mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chess_core::GameRecord;
use common::{scholars_mate, KINGS_GAMBIT_PGN};
use indexer_worker::input::GameLines;
use indexer_worker::{reanalyze, FeatureSink, JsonLinesSink, MemorySink, WorkerConfig, WorkerError};
use motif_detectors::{GameFeatures, Motif, PositionContext};

fn config(batch_size: usize, max_workers: usize) -> WorkerConfig {
    WorkerConfig {
        batch_size,
        max_workers,
        ..WorkerConfig::default()
    }
}

fn corrupt_games() -> Vec<GameRecord> {
    vec![
        GameRecord::from_moves("illegal", vec!["e4".into(), "Ke3".into()]),
        GameRecord::from_pgn("headers-only", r#"[White "nobody"]"#),
        GameRecord {
            game_id: "bad-placement".into(),
            positions: Some(vec![
                PositionContext::new("4k3/8/8/8/8/8/8/4K3 w - - 0 1", 0, true, None),
                PositionContext::new("4k3/8/8/8/8/8/8", 1, false, Some("Kd1")),
            ]),
            ..GameRecord::default()
        },
        GameRecord {
            game_id: "backwards".into(),
            positions: Some(vec![
                PositionContext::new("4k3/8/8/8/8/8/8/3K4 b - - 1 5", 5, false, Some("Kd1")),
                PositionContext::new("4k3/8/8/8/8/8/8/4K3 b - - 1 4", 4, false, Some("Ke1")),
            ]),
            ..GameRecord::default()
        },
    ]
}

#[tokio::test]
async fn test_batch_isolation() {
    let mut games = vec![GameRecord::from_pgn("kg", KINGS_GAMBIT_PGN)];
    games.extend(corrupt_games());
    games.push(scholars_mate("scholar"));

    let n = games.len();
    let mut sink = MemorySink::new();
    let summary = reanalyze(games, &config(2, 3), &mut sink).await.unwrap();

    assert_eq!(summary.processed + summary.failed, n);
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 4);
    assert_eq!(sink.games.len(), 2);
    assert_eq!(sink.get("kg").unwrap().num_moves, 54);
    assert!(sink.get("scholar").unwrap().has(Motif::Checkmate));
}

#[tokio::test]
async fn test_batch_size_does_not_change_results() {
    let games = || vec![GameRecord::from_pgn("kg", KINGS_GAMBIT_PGN), scholars_mate("scholar")];

    let mut one_by_one = MemorySink::new();
    reanalyze(games(), &config(1, 1), &mut one_by_one).await.unwrap();

    let mut all_at_once = MemorySink::new();
    reanalyze(games(), &config(100, 4), &mut all_at_once).await.unwrap();

    assert_eq!(one_by_one.games, all_at_once.games);
}

#[tokio::test]
async fn test_rerun_replaces_prior_features() {
    let mut sink = MemorySink::new();
    reanalyze(vec![scholars_mate("g")], &config(10, 2), &mut sink).await.unwrap();
    let first = sink.get("g").unwrap().clone();

    let mut cfg = config(10, 2);
    cfg.disabled_motifs = vec![Motif::Checkmate];
    reanalyze(vec![scholars_mate("g")], &cfg, &mut sink).await.unwrap();
    let second = sink.get("g").unwrap();

    assert!(first.has(Motif::Checkmate));
    assert!(!second.has(Motif::Checkmate));
    assert_eq!(second.count(Motif::Check), first.count(Motif::Check));
}

#[tokio::test]
async fn test_json_lines_round_trip_in_input_order() {
    let input = format!(
        "{}\n{}\n{}\n",
        serde_json::to_string(&scholars_mate("first")).unwrap(),
        r#"{"gameId":"broken","moves":["e4","e4"]}"#,
        serde_json::to_string(&GameRecord::from_pgn("second", KINGS_GAMBIT_PGN)).unwrap(),
    );
    let mut games = GameLines::new(input.as_bytes());

    let mut sink = JsonLinesSink::new(Vec::new());
    let summary = reanalyze(&mut games, &config(2, 2), &mut sink).await.unwrap();
    assert_eq!(summary.total(), 3);
    assert_eq!(summary.failed, 1);
    assert_eq!(games.finish().unwrap(), 0);

    let text = String::from_utf8(sink.into_inner()).unwrap();
    let ids: Vec<String> = text
        .lines()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).unwrap()["gameId"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec!["first", "second"]);
}

/// Records how many input games had been pulled at the time of each write.
struct PullTracker {
    pulled: Arc<AtomicUsize>,
    seen_at_write: Vec<usize>,
}

impl FeatureSink for PullTracker {
    fn replace(&mut self, _game_id: &str, _features: &GameFeatures) -> Result<(), WorkerError> {
        self.seen_at_write.push(self.pulled.load(Ordering::SeqCst));
        Ok(())
    }
}

#[tokio::test]
async fn test_input_is_pulled_one_batch_at_a_time() {
    let pulled = Arc::new(AtomicUsize::new(0));
    let counter = pulled.clone();
    let games = (0..5)
        .map(|i| scholars_mate(&format!("g{i}")))
        .inspect(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

    let mut sink = PullTracker {
        pulled: pulled.clone(),
        seen_at_write: Vec::new(),
    };
    let summary = reanalyze(games, &config(2, 4), &mut sink).await.unwrap();

    assert_eq!(summary.processed, 5);
    assert_eq!(pulled.load(Ordering::SeqCst), 5);
    // No game beyond the current batch is read before that batch is written
    assert_eq!(sink.seen_at_write, vec![2, 2, 4, 4, 5]);
}
