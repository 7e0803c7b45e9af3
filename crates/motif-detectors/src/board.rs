//! 8x8 signed-integer board decoded from a FEN placement field.
//!
//! Row 0 is rank 8 and column 0 is file a, so `a8` is `(0, 0)` and `h1` is
//! `(7, 7)`. Piece codes: P=1, N=2, B=3, R=4, Q=5, K=6, negative for black.

use std::fmt;

use thiserror::Error;

pub const EMPTY: i8 = 0;
pub const PAWN: i8 = 1;
pub const KNIGHT: i8 = 2;
pub const BISHOP: i8 = 3;
pub const ROOK: i8 = 4;
pub const QUEEN: i8 = 5;
pub const KING: i8 = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} covers {columns} columns")]
    ColumnCount { rank: usize, columns: usize },

    #[error("unrecognized placement character '{0}'")]
    UnknownPiece(char),
}

/// A square in board-array coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    pub fn on_board(self) -> bool {
        (0..8).contains(&self.row) && (0..8).contains(&self.col)
    }

    /// The square `(dr, dc)` away, or None if it falls off the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let sq = Square::new(self.row + dr, self.col + dc);
        sq.on_board().then_some(sq)
    }

    /// Algebraic name: `(7, 4)` is `e1`, `(0, 0)` is `a8`.
    pub fn name(self) -> String {
        let file = (b'a' + self.col as u8) as char;
        let rank = (b'8' - self.row as u8) as char;
        format!("{file}{rank}")
    }

    /// Parse an algebraic square name like `e4`.
    pub fn parse(name: &str) -> Option<Square> {
        let bytes = name.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Some(Square::new((b'8' - rank) as i8, (file - b'a') as i8))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Decoded board. Read-only once built; detectors only ever borrow it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[i8; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self { cells: [[EMPTY; 8]; 8] }
    }

    /// Decode a placement string. A full FEN is accepted; only its first
    /// field is read.
    pub fn decode(fen: &str) -> Result<Self, BoardError> {
        let placement = fen.split_whitespace().next().unwrap_or("");
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(BoardError::RankCount(ranks.len()));
        }

        let mut board = Board::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0usize;
            for ch in rank.chars() {
                if let Some(run) = ch.to_digit(10) {
                    if run == 0 || run > 8 {
                        return Err(BoardError::UnknownPiece(ch));
                    }
                    col += run as usize;
                } else {
                    let piece = piece_from_char(ch).ok_or(BoardError::UnknownPiece(ch))?;
                    if col < 8 {
                        board.cells[row][col] = piece;
                    }
                    col += 1;
                }
                if col > 8 {
                    return Err(BoardError::ColumnCount { rank: row, columns: col });
                }
            }
            if col != 8 {
                return Err(BoardError::ColumnCount { rank: row, columns: col });
            }
        }
        Ok(board)
    }

    /// Run-length encode back to a placement string.
    pub fn encode(&self) -> String {
        let mut out = String::with_capacity(72);
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                out.push('/');
            }
            let mut empties = 0;
            for &piece in cells {
                if piece == EMPTY {
                    empties += 1;
                    continue;
                }
                if empties > 0 {
                    out.push_str(&empties.to_string());
                    empties = 0;
                }
                out.push(piece_char(piece));
            }
            if empties > 0 {
                out.push_str(&empties.to_string());
            }
        }
        out
    }

    /// Piece code on `sq`; off-board squares read as empty.
    #[inline]
    pub fn at(&self, sq: Square) -> i8 {
        if sq.on_board() {
            self.cells[sq.row as usize][sq.col as usize]
        } else {
            EMPTY
        }
    }

    /// All occupied squares with their piece, rank 8 first, file a first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, i8)> + '_ {
        squares().filter_map(move |sq| {
            let piece = self.at(sq);
            (piece != EMPTY).then_some((sq, piece))
        })
    }

    /// Occupied squares belonging to one side.
    pub fn pieces_of(&self, white: bool) -> impl Iterator<Item = (Square, i8)> + '_ {
        self.pieces().filter(move |&(_, p)| is_white(p) == white)
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }
}

/// Every square in scan order (row-major from a8).
pub fn squares() -> impl Iterator<Item = Square> {
    (0..8).flat_map(|row| (0..8).map(move |col| Square::new(row, col)))
}

#[inline]
pub fn is_white(piece: i8) -> bool {
    piece > 0
}

/// Piece type 1..=6 regardless of color.
#[inline]
pub fn kind(piece: i8) -> i8 {
    piece.abs()
}

/// Material value used by the significance filters: the piece type itself.
#[inline]
pub fn value(piece: i8) -> i32 {
    piece.abs() as i32
}

#[inline]
pub fn is_slider(piece: i8) -> bool {
    matches!(kind(piece), BISHOP | ROOK | QUEEN)
}

/// Both pieces present and on opposite sides.
#[inline]
pub fn is_enemy(a: i8, b: i8) -> bool {
    a != EMPTY && b != EMPTY && is_white(a) != is_white(b)
}

pub fn piece_from_char(ch: char) -> Option<i8> {
    let code = match ch.to_ascii_uppercase() {
        'P' => PAWN,
        'N' => KNIGHT,
        'B' => BISHOP,
        'R' => ROOK,
        'Q' => QUEEN,
        'K' => KING,
        _ => return None,
    };
    Some(if ch.is_ascii_uppercase() { code } else { -code })
}

/// FEN letter: uppercase for white, lowercase for black.
pub fn piece_char(piece: i8) -> char {
    let letter = match kind(piece) {
        PAWN => 'P',
        KNIGHT => 'N',
        BISHOP => 'B',
        ROOK => 'R',
        QUEEN => 'Q',
        KING => 'K',
        _ => '?',
    };
    if is_white(piece) {
        letter
    } else {
        letter.to_ascii_lowercase()
    }
}
