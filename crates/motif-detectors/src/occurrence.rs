//! Occurrence records emitted by detectors and the per-game summary.

use serde::{Deserialize, Serialize};

use crate::context::PositionContext;
use crate::motif::Motif;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn from_white(white: bool) -> Self {
        if white {
            Side::White
        } else {
            Side::Black
        }
    }

    pub fn is_white(self) -> bool {
        self == Side::White
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::White => "white",
            Side::Black => "black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PinType {
    /// Pinned against the king; the pinned piece cannot legally move off the line.
    Absolute,
    /// Pinned against the queen.
    Relative,
}

/// One detected tactic at one ply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotifOccurrence {
    pub motif: Motif,
    pub ply: u32,
    pub move_number: u32,
    pub side: Side,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moved_piece: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attacker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default)]
    pub is_discovered: bool,
    #[serde(default)]
    pub is_mate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_type: Option<PinType>,
}

/// Half-move index of the move that produced a position.
///
/// White's move N is ply `2N - 1`, black's move N is ply `2N`. Black moves are
/// recorded under the already-incremented full-move counter, hence `2(N - 1)`.
pub fn ply_for(move_number: u32, white_moved: bool) -> i64 {
    let n = i64::from(move_number);
    if white_moved {
        2 * n - 1
    } else {
        2 * (n - 1)
    }
}

impl MotifOccurrence {
    /// Occurrence for the move that led to `ctx`, credited to the side that
    /// just moved. None when the derived ply is not positive.
    pub fn at(motif: Motif, ctx: &PositionContext, description: impl Into<String>) -> Option<Self> {
        let side = ctx.mover();
        let ply = ply_for(ctx.move_number, side.is_white());
        if ply <= 0 {
            return None;
        }
        Some(Self {
            motif,
            ply: u32::try_from(ply).ok()?,
            move_number: ctx.move_number,
            side,
            description: description.into(),
            moved_piece: None,
            attacker: None,
            target: None,
            is_discovered: false,
            is_mate: false,
            pin_type: None,
        })
    }

    pub fn with_pieces(mut self, attacker: impl Into<String>, target: impl Into<String>) -> Self {
        self.attacker = Some(attacker.into());
        self.target = Some(target.into());
        self
    }

    pub fn with_moved_piece(mut self, moved: impl Into<String>) -> Self {
        self.moved_piece = Some(moved.into());
        self
    }

    pub fn discovered(mut self) -> Self {
        self.is_discovered = true;
        self
    }

    pub fn mate(mut self, is_mate: bool) -> Self {
        self.is_mate = is_mate;
        self
    }

    pub fn pin(mut self, pin_type: PinType) -> Self {
        self.pin_type = Some(pin_type);
        self
    }
}

macro_rules! motif_flags {
    ($($motif:ident => $field:ident),* $(,)?) => {
        /// One boolean per motif: true when the game has at least one occurrence.
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct MotifFlags {
            $(pub $field: bool,)*
        }

        impl MotifFlags {
            pub fn set(&mut self, motif: Motif) {
                match motif {
                    $(Motif::$motif => self.$field = true,)*
                }
            }

            pub fn has(&self, motif: Motif) -> bool {
                match motif {
                    $(Motif::$motif => self.$field,)*
                }
            }
        }
    };
}

motif_flags! {
    Pin => has_pin,
    CrossPin => has_cross_pin,
    Fork => has_fork,
    Skewer => has_skewer,
    Attack => has_attack,
    DiscoveredAttack => has_discovered_attack,
    DiscoveredCheck => has_discovered_check,
    Check => has_check,
    Checkmate => has_checkmate,
    Promotion => has_promotion,
    PromotionWithCheck => has_promotion_with_check,
    PromotionWithCheckmate => has_promotion_with_checkmate,
    BackRankMate => has_back_rank_mate,
    SmotheredMate => has_smothered_mate,
    Sacrifice => has_sacrifice,
    Zugzwang => has_zugzwang,
    DoubleCheck => has_double_check,
    Interference => has_interference,
    OverloadedPiece => has_overloaded_piece,
}

impl MotifFlags {
    pub fn from_occurrences(occurrences: &[MotifOccurrence]) -> Self {
        let mut flags = Self::default();
        for occ in occurrences {
            flags.set(occ.motif);
        }
        flags
    }
}

/// Everything the index stores for one game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameFeatures {
    pub num_moves: u32,
    pub occurrences: Vec<MotifOccurrence>,
    #[serde(flatten)]
    pub flags: MotifFlags,
}

impl GameFeatures {
    pub fn new(num_moves: u32, occurrences: Vec<MotifOccurrence>) -> Self {
        let flags = MotifFlags::from_occurrences(&occurrences);
        Self {
            num_moves,
            occurrences,
            flags,
        }
    }

    pub fn has(&self, motif: Motif) -> bool {
        self.flags.has(motif)
    }

    pub fn count(&self, motif: Motif) -> usize {
        self.occurrences.iter().filter(|o| o.motif == motif).count()
    }
}
