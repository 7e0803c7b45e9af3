use motif_detectors::PositionContext;
use serde::{Deserialize, Serialize};

use crate::pgn::parse_pgn;
use crate::replay::{replay_san, ReplayError};

/// One game as read from the input stream.
///
/// A game can arrive already replayed (`positions`), as a SAN list
/// (`moves`) or as PGN text. The first one present wins, in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub game_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positions: Option<Vec<PositionContext>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moves: Option<Vec<String>>, // SAN notation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pgn: Option<String>,
}

impl GameRecord {
    pub fn from_pgn(game_id: impl Into<String>, pgn: impl Into<String>) -> Self {
        Self {
            game_id: game_id.into(),
            pgn: Some(pgn.into()),
            ..Self::default()
        }
    }

    pub fn from_moves(game_id: impl Into<String>, moves: Vec<String>) -> Self {
        Self {
            game_id: game_id.into(),
            moves: Some(moves),
            ..Self::default()
        }
    }

    /// The game's position sequence, replaying moves when needed.
    pub fn to_positions(&self) -> Result<Vec<PositionContext>, ReplayError> {
        if let Some(positions) = &self.positions {
            return Ok(positions.clone());
        }
        if let Some(moves) = &self.moves {
            return replay_san(moves);
        }
        if let Some(pgn) = &self.pgn {
            return replay_san(&parse_pgn(pgn)?);
        }
        Err(ReplayError::EmptyRecord(self.game_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let record: GameRecord =
            serde_json::from_str(r#"{"gameId":"g1","moves":["e4","e5"]}"#).unwrap();
        assert_eq!(record.game_id, "g1");
        assert_eq!(record.moves.as_deref().map(<[String]>::len), Some(2));
        assert!(record.positions.is_none());
        assert_eq!(record.to_positions().unwrap().len(), 3);
    }

    #[test]
    fn test_positions_take_priority() {
        let record = GameRecord {
            game_id: "g2".to_string(),
            positions: Some(vec![PositionContext::new("8/8/8/8/8/8/8/8", 0, true, None)]),
            moves: Some(vec!["e4".to_string()]),
            pgn: None,
        };
        assert_eq!(record.to_positions().unwrap().len(), 1);
    }

    #[test]
    fn test_pgn_record() {
        let record = GameRecord::from_pgn("g3", "1. e4 e5 2. Qh5 Nc6 3. Bc4 Nf6 4. Qxf7# 1-0");
        let positions = record.to_positions().unwrap();
        assert_eq!(positions.len(), 8);
        assert_eq!(positions[7].last_move.as_deref(), Some("Qxf7#"));
        assert_eq!(positions[7].move_number, 4);
    }

    #[test]
    fn test_empty_record_is_an_error() {
        let record: GameRecord = serde_json::from_str(r#"{"gameId":"g4"}"#).unwrap();
        assert!(matches!(record.to_positions(), Err(ReplayError::EmptyRecord(id)) if id == "g4"));
    }
}
