//! Static position evaluation
//!
//! The score is the sum of material and piece-square bonuses over all the pieces, counted
//! positively for White and negatively for Black. No search is performed here.

use crate::board::Board;
use crate::types::{Color, Piece};

/// Material value of a piece, in centipawns
pub const fn piece_value(p: Piece) -> i32 {
    match p {
        Piece::Pawn => 100,
        Piece::Knight => 300,
        Piece::Bishop => 330,
        Piece::Rook => 500,
        Piece::Queen => 900,
        Piece::King => 0,
    }
}

type Table = [[i32; 8]; 8];

const PAWN: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT: Table = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP: Table = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const ROOK: Table = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, 10, 10, 10, 10, 5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [0, 0, 0, 5, 5, 0, 0, 0],
];

const QUEEN: Table = [
    [-20, -10, -10, -5, -5, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [0, 0, 5, 5, 5, 5, 0, -5],
    [-10, 5, 5, 5, 5, 5, 0, -10],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-20, -10, -10, -5, -5, -10, -10, -20],
];

const KING: Table = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [20, 20, 0, 0, 0, 0, 20, 20],
    [20, 30, 10, 0, 0, 10, 30, 20],
];

fn table(p: Piece) -> &'static Table {
    match p {
        Piece::Pawn => &PAWN,
        Piece::Knight => &KNIGHT,
        Piece::Bishop => &BISHOP,
        Piece::Rook => &ROOK,
        Piece::Queen => &QUEEN,
        Piece::King => &KING,
    }
}

/// Positional bonus of piece `p` of color `c` standing on `(row, col)`
///
/// Tables are given for White. For Black, they are mirrored vertically.
pub fn square_bonus(c: Color, p: Piece, row: usize, col: usize) -> i32 {
    let row = match c {
        Color::White => row,
        Color::Black => 7 - row,
    };
    table(p)[row][col]
}

/// Evaluates the board, positive values favor White
///
/// # Example
///
/// ```
/// # use neuroboard::{eval, Board};
/// #
/// assert_eq!(eval::evaluate(&Board::initial()), 0);
/// ```
pub fn evaluate(b: &Board) -> i32 {
    b.occupied()
        .filter_map(|(coord, cell)| cell.parts().map(|parts| (coord, parts)))
        .map(|(coord, (color, piece))| {
            let score = piece_value(piece) + square_bonus(color, piece, coord.row(), coord.col());
            match color {
                Color::White => score,
                Color::Black => -score,
            }
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::{self, Move};

    #[test]
    fn test_initial() {
        assert_eq!(evaluate(&Board::initial()), 0);
        assert_eq!(evaluate(&Board::empty()), 0);
    }

    #[test]
    fn test_symmetric() {
        let white = Board::from_fen("4k3/8/8/8/3N4/8/8/4K3").unwrap();
        let black = Board::from_fen("4k3/8/8/3n4/8/8/8/4K3").unwrap();
        // d4 is row 4 for White, d5 is row 3, mirrored to row 4 for Black
        assert_eq!(evaluate(&white), 300 + 20);
        assert_eq!(evaluate(&black), -(300 + 20));
    }

    #[test]
    fn test_tables() {
        let b = Board::from_fen("4k3/8/8/8/8/8/P7/4K3").unwrap();
        // Kings cancel each other, pawn on a2 is row 6
        assert_eq!(evaluate(&b), 100 + 50);
        assert_eq!(square_bonus(Color::Black, Piece::Pawn, 1, 0), 50);
        assert_eq!(square_bonus(Color::White, Piece::King, 7, 6), 30);
        assert_eq!(square_bonus(Color::Black, Piece::King, 0, 6), 30);
    }

    #[test]
    fn test_promote() {
        let mut b = Board::from_fen("4k3/P7/8/8/8/8/8/4K3").unwrap();
        assert_eq!(evaluate(&b), 100 + 5);
        let _ = moves::make_move_unchecked(&mut b, Move::from_uci("a7a8").unwrap());
        // Queen on a8 is row 0
        assert_eq!(evaluate(&b), 900 - 20);
    }
}
