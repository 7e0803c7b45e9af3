//! Motif tags and their stable query names.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every tactical motif the engine detects, in registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Motif {
    Pin,
    CrossPin,
    Fork,
    Skewer,
    Attack,
    DiscoveredAttack,
    DiscoveredCheck,
    Check,
    Checkmate,
    Promotion,
    PromotionWithCheck,
    PromotionWithCheckmate,
    BackRankMate,
    SmotheredMate,
    Sacrifice,
    Zugzwang,
    DoubleCheck,
    Interference,
    OverloadedPiece,
}

/// Query tag and display name for each motif. The downstream query layer
/// whitelists exactly these tags.
pub const MOTIF_TAGS: &[(Motif, &str, &str)] = &[
    (Motif::Pin, "pin", "Pin"),
    (Motif::CrossPin, "cross_pin", "Cross Pin"),
    (Motif::Fork, "fork", "Fork"),
    (Motif::Skewer, "skewer", "Skewer"),
    (Motif::Attack, "attack", "Attack"),
    (Motif::DiscoveredAttack, "discovered_attack", "Discovered Attack"),
    (Motif::DiscoveredCheck, "discovered_check", "Discovered Check"),
    (Motif::Check, "check", "Check"),
    (Motif::Checkmate, "checkmate", "Checkmate"),
    (Motif::Promotion, "promotion", "Promotion"),
    (Motif::PromotionWithCheck, "promotion_with_check", "Promotion With Check"),
    (Motif::PromotionWithCheckmate, "promotion_with_checkmate", "Promotion With Checkmate"),
    (Motif::BackRankMate, "back_rank_mate", "Back Rank Mate"),
    (Motif::SmotheredMate, "smothered_mate", "Smothered Mate"),
    (Motif::Sacrifice, "sacrifice", "Sacrifice"),
    (Motif::Zugzwang, "zugzwang", "Zugzwang"),
    (Motif::DoubleCheck, "double_check", "Double Check"),
    (Motif::Interference, "interference", "Interference"),
    (Motif::OverloadedPiece, "overloaded_piece", "Overloaded Piece"),
];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown motif tag '{0}'")]
pub struct UnknownMotif(pub String);

impl Motif {
    pub const ALL: [Motif; 19] = [
        Motif::Pin,
        Motif::CrossPin,
        Motif::Fork,
        Motif::Skewer,
        Motif::Attack,
        Motif::DiscoveredAttack,
        Motif::DiscoveredCheck,
        Motif::Check,
        Motif::Checkmate,
        Motif::Promotion,
        Motif::PromotionWithCheck,
        Motif::PromotionWithCheckmate,
        Motif::BackRankMate,
        Motif::SmotheredMate,
        Motif::Sacrifice,
        Motif::Zugzwang,
        Motif::DoubleCheck,
        Motif::Interference,
        Motif::OverloadedPiece,
    ];

    pub fn tag(self) -> &'static str {
        MOTIF_TAGS
            .iter()
            .find(|(m, _, _)| *m == self)
            .map(|(_, tag, _)| *tag)
            .unwrap_or("")
    }

    pub fn display_name(self) -> &'static str {
        MOTIF_TAGS
            .iter()
            .find(|(m, _, _)| *m == self)
            .map(|(_, _, name)| *name)
            .unwrap_or("")
    }
}

impl fmt::Display for Motif {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Motif {
    type Err = UnknownMotif;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MOTIF_TAGS
            .iter()
            .find(|(_, tag, _)| *tag == wanted)
            .map(|(m, _, _)| *m)
            .ok_or_else(|| UnknownMotif(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_table_covers_every_motif_in_order() {
        assert_eq!(MOTIF_TAGS.len(), Motif::ALL.len());
        for (motif, (tabled, _, _)) in Motif::ALL.iter().zip(MOTIF_TAGS) {
            assert_eq!(motif, tabled);
        }
    }

    #[test]
    fn test_tags_parse_back() {
        for motif in Motif::ALL {
            assert_eq!(motif.tag().parse::<Motif>().unwrap(), motif);
        }
        assert_eq!(" fork ".parse::<Motif>().unwrap(), Motif::Fork);
        assert!("knight_fork".parse::<Motif>().is_err());
    }

    #[test]
    fn test_serde_uses_query_tags() {
        for motif in Motif::ALL {
            let json = serde_json::to_string(&motif).unwrap();
            assert_eq!(json, format!("\"{}\"", motif.tag()));
        }
    }
}
