//! Destinations for per-game features

use std::collections::HashMap;
use std::io::Write;

use motif_detectors::GameFeatures;
use serde::Serialize;

use crate::error::WorkerError;

/// Stores the features of one game, replacing whatever was stored for that
/// game id before.
pub trait FeatureSink {
    fn replace(&mut self, game_id: &str, features: &GameFeatures) -> Result<(), WorkerError>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FeatureLine<'a> {
    game_id: &'a str,
    #[serde(flatten)]
    features: &'a GameFeatures,
}

/// One JSON object per game, newline separated.
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn flush(&mut self) -> Result<(), WorkerError> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> FeatureSink for JsonLinesSink<W> {
    fn replace(&mut self, game_id: &str, features: &GameFeatures) -> Result<(), WorkerError> {
        serde_json::to_writer(&mut self.writer, &FeatureLine { game_id, features })?;
        self.writer.write_all(b"\n")?;
        self.written += 1;
        Ok(())
    }
}

/// In-memory index keyed by game id.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub games: HashMap<String, GameFeatures>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, game_id: &str) -> Option<&GameFeatures> {
        self.games.get(game_id)
    }
}

impl FeatureSink for MemorySink {
    fn replace(&mut self, game_id: &str, features: &GameFeatures) -> Result<(), WorkerError> {
        self.games.insert(game_id.to_string(), features.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_detectors::{Motif, MotifOccurrence, PositionContext};

    fn features_with_check() -> GameFeatures {
        let ctx = PositionContext::new("4k3/8/8/8/8/8/8/4RK2", 30, false, Some("Re1+"));
        let occ = MotifOccurrence::at(Motif::Check, &ctx, "Re1+").unwrap();
        GameFeatures::new(30, vec![occ])
    }

    #[test]
    fn test_json_lines_output() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.replace("g1", &features_with_check()).unwrap();
        sink.replace("g2", &GameFeatures::default()).unwrap();
        assert_eq!(sink.written(), 2);

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["gameId"], "g1");
        assert_eq!(lines[0]["hasCheck"], true);
        assert_eq!(lines[0]["occurrences"][0]["ply"], 59);
        assert_eq!(lines[1]["hasCheck"], false);
    }

    #[test]
    fn test_memory_sink_replaces_wholesale() {
        let mut sink = MemorySink::new();
        sink.replace("g1", &features_with_check()).unwrap();
        sink.replace("g1", &GameFeatures::default()).unwrap();
        assert_eq!(sink.games.len(), 1);
        let stored = sink.get("g1").unwrap();
        assert!(stored.occurrences.is_empty());
        assert!(!stored.has(Motif::Check));
    }
}
