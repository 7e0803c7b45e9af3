//! Attack geometry shared by all detectors.
//!
//! Every attack test here is pseudo-legal: it follows piece movement and
//! blocking, never check legality.

use crate::board::{self, Board, Square, BISHOP, EMPTY, KING, KNIGHT, PAWN, QUEEN, ROOK};

/// A unit step along a rank, file or diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Direction {
    pub dr: i8,
    pub dc: i8,
}

impl Direction {
    pub const fn new(dr: i8, dc: i8) -> Self {
        Self { dr, dc }
    }

    pub fn is_diagonal(self) -> bool {
        self.dr != 0 && self.dc != 0
    }

    pub fn reversed(self) -> Self {
        Self::new(-self.dr, -self.dc)
    }

    /// Unit direction from `from` towards `to` if they share a line.
    pub fn between(from: Square, to: Square) -> Option<Self> {
        let dr = to.row - from.row;
        let dc = to.col - from.col;
        if (dr, dc) == (0, 0) {
            return None;
        }
        if dr != 0 && dc != 0 && dr.abs() != dc.abs() {
            return None;
        }
        Some(Self::new(dr.signum(), dc.signum()))
    }
}

pub const ORTHOGONAL: [Direction; 4] = [
    Direction::new(0, 1),
    Direction::new(0, -1),
    Direction::new(1, 0),
    Direction::new(-1, 0),
];

pub const DIAGONAL: [Direction; 4] = [
    Direction::new(1, 1),
    Direction::new(1, -1),
    Direction::new(-1, 1),
    Direction::new(-1, -1),
];

pub const ALL_DIRECTIONS: [Direction; 8] = [
    Direction::new(0, 1),
    Direction::new(0, -1),
    Direction::new(1, 0),
    Direction::new(-1, 0),
    Direction::new(1, 1),
    Direction::new(1, -1),
    Direction::new(-1, 1),
    Direction::new(-1, -1),
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Squares outward from `from` (exclusive) along `dir` to the board edge,
/// with the piece on each. Callers decide where the ray stops.
pub fn ray(board: &Board, from: Square, dir: Direction) -> impl Iterator<Item = (Square, i8)> + '_ {
    std::iter::successors(from.offset(dir.dr, dir.dc), move |sq| sq.offset(dir.dr, dir.dc))
        .map(move |sq| (sq, board.at(sq)))
}

/// Only the occupied squares along a ray, nearest first.
pub fn occupied_on_ray(
    board: &Board,
    from: Square,
    dir: Direction,
) -> impl Iterator<Item = (Square, i8)> + '_ {
    ray(board, from, dir).filter(|&(_, piece)| piece != EMPTY)
}

/// Does a slider of this piece type attack along `dir`?
pub fn slides_along(piece: i8, dir: Direction) -> bool {
    match board::kind(piece) {
        QUEEN => true,
        BISHOP => dir.is_diagonal(),
        ROOK => !dir.is_diagonal(),
        _ => false,
    }
}

/// Directions a piece slides in; empty for non-sliders.
pub fn slide_directions(piece: i8) -> &'static [Direction] {
    match board::kind(piece) {
        QUEEN => &ALL_DIRECTIONS,
        BISHOP => &DIAGONAL,
        ROOK => &ORTHOGONAL,
        _ => &[],
    }
}

/// All squares strictly between `from` and `to` are empty.
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    let Some(dir) = Direction::between(from, to) else {
        return false;
    };
    ray(board, from, dir)
        .take_while(|&(sq, _)| sq != to)
        .all(|(_, piece)| piece == EMPTY)
}

/// True if the piece on `from` pseudo-attacks `to`.
pub fn piece_attacks_square(board: &Board, from: Square, to: Square) -> bool {
    let piece = board.at(from);
    if piece == EMPTY || from == to || !from.on_board() || !to.on_board() {
        return false;
    }

    let dr = to.row - from.row;
    let dc = to.col - from.col;

    match board::kind(piece) {
        PAWN => {
            let forward = if board::is_white(piece) { -1 } else { 1 };
            dr == forward && dc.abs() == 1
        }
        KNIGHT => matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2)),
        BISHOP => dr.abs() == dc.abs() && is_path_clear(board, from, to),
        ROOK => (dr == 0 || dc == 0) && is_path_clear(board, from, to),
        QUEEN => {
            (dr == 0 || dc == 0 || dr.abs() == dc.abs()) && is_path_clear(board, from, to)
        }
        KING => dr.abs() <= 1 && dc.abs() <= 1,
        _ => false,
    }
}

/// Enemy pieces the piece on `from` attacks, in board scan order.
pub fn attacked_enemies(board: &Board, from: Square) -> Vec<(Square, i8)> {
    let attacker = board.at(from);
    board
        .pieces()
        .filter(|&(_, p)| board::is_enemy(attacker, p))
        .filter(|&(sq, _)| piece_attacks_square(board, from, sq))
        .collect()
}

pub fn knight_squares(from: Square) -> impl Iterator<Item = Square> {
    KNIGHT_OFFSETS
        .into_iter()
        .filter_map(move |(dr, dc)| from.offset(dr, dc))
}

pub fn find_king(board: &Board, white: bool) -> Option<Square> {
    let king = if white { KING } else { -KING };
    board.pieces().find(|&(_, p)| p == king).map(|(sq, _)| sq)
}

/// Number of `by_white` pieces attacking `target`. The piece on `target`
/// itself is not counted.
pub fn count_attackers(board: &Board, target: Square, by_white: bool) -> usize {
    board
        .pieces_of(by_white)
        .filter(|&(sq, _)| sq != target && piece_attacks_square(board, sq, target))
        .count()
}

/// Destination of a promotion move such as `e8=Q+` or `axb8=N#`.
pub fn parse_promotion_destination(san: &str) -> Option<Square> {
    let eq = san.find('=')?;
    if eq < 2 {
        return None;
    }
    Square::parse(san.get(eq - 2..eq)?)
}

/// `Qe1`, `ke8`: FEN letter followed by the square.
pub fn piece_notation(piece: i8, sq: Square) -> String {
    format!("{}{}", board::piece_char(piece), sq.name())
}

/// Castling moves never count as the mover's direct attack.
pub fn is_castling(san: &str) -> bool {
    san.starts_with("O-O") || san.starts_with("0-0")
}

pub fn is_check(san: &str) -> bool {
    san.ends_with('+') || san.ends_with('#')
}

pub fn is_mate(san: &str) -> bool {
    san.ends_with('#')
}
