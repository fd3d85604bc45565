use super::uci;
use crate::board::{Board, Position};
use crate::geometry;
use crate::movegen;
use crate::types::{Cell, Coord, CoordError, Piece};

use std::fmt;

use arrayvec::ArrayVec;
use thiserror::Error;

/// Chess move
///
/// A move is just a pair of squares. It carries no information about the moving piece, captures or
/// promotions: all of this is inferred from the board when the move is applied.
///
/// Moves can have different degrees of validity:
///
/// - _Semilegal_. A move is considered semilegal if it obeys the movement rules of the piece on its
///   source square, but the mover's king can remain under attack after such move.
///
/// - _Legal_. A move is considered legal if it's semilegal plus the king doesn't remain under
///   attack.
///
/// Any move can be applied with [`make_move_unchecked()`], but only legal moves make sense.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    src: Coord,
    dst: Coord,
}

/// Error indicating that move is invalid
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// Move is not semi-legal
    #[error("move is not semi-legal")]
    NotSemiLegal,
    /// Move is not legal
    #[error("move is not legal")]
    NotLegal,
    /// Legality cannot be checked, as the position is corrupted
    #[error("corrupted position: {0}")]
    Position(#[from] movegen::Error),
}

/// Error creating move
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CreateError {
    /// One of the squares is outside the board
    #[error("bad square: {0}")]
    OutOfBounds(#[from] CoordError),
}

impl Move {
    /// Creates a move from its source and destination squares
    #[inline]
    pub const fn new(src: Coord, dst: Coord) -> Move {
        Move { src, dst }
    }

    /// Creates a move from raw `(row, col)` pairs, rejecting squares outside the board
    ///
    /// # Example
    ///
    /// ```
    /// # use neuroboard::Move;
    /// #
    /// let mv = Move::from_row_col((6, 4), (4, 4)).unwrap();
    /// assert_eq!(mv.to_string(), "e2e4");
    /// assert!(Move::from_row_col((6, 4), (8, 4)).is_err());
    /// ```
    pub fn from_row_col(src: (isize, isize), dst: (isize, isize)) -> Result<Move, CreateError> {
        Ok(Move {
            src: Coord::from_row_col(src.0, src.1)?,
            dst: Coord::from_row_col(dst.0, dst.1)?,
        })
    }

    /// Returns the source and destination squares as `(row, col)` pairs
    #[inline]
    pub fn row_col(&self) -> ((usize, usize), (usize, usize)) {
        (
            (self.src.row(), self.src.col()),
            (self.dst.row(), self.dst.col()),
        )
    }

    /// Parses the move from the UCI string `s`
    ///
    /// The returned move is **not** guaranteed to be semilegal in any position.
    #[inline]
    pub fn from_uci(s: &str) -> Result<Move, uci::RawParseError> {
        s.parse()
    }

    /// Same as [`Move::from_uci()`], but the returned move is guaranteed to be semilegal in `p`
    pub fn from_uci_semilegal(s: &str, p: &Position) -> Result<Move, uci::ParseError> {
        let res = Move::from_uci(s)?;
        res.semi_validate(p)?;
        Ok(res)
    }

    /// Same as [`Move::from_uci()`], but the returned move is guaranteed to be legal in `p`
    pub fn from_uci_legal(s: &str, p: &Position) -> Result<Move, uci::ParseError> {
        let res = Move::from_uci(s)?;
        res.validate(p)?;
        Ok(res)
    }

    /// Returns `true` if the move is semilegal in `p`
    pub fn is_semilegal(&self, p: &Position) -> bool {
        // A single piece has at most 27 moves
        let mut moves = ArrayVec::<Move, 32>::new();
        movegen::gen_piece_pseudo_into(p.board(), p.side(), self.src, &mut moves);
        moves.contains(self)
    }

    /// Validates whether this move is semilegal in `p`
    #[inline]
    pub fn semi_validate(&self, p: &Position) -> Result<(), ValidateError> {
        match self.is_semilegal(p) {
            true => Ok(()),
            false => Err(ValidateError::NotSemiLegal),
        }
    }

    /// Validates whether this move is legal in `p`
    pub fn validate(&self, p: &Position) -> Result<(), ValidateError> {
        self.semi_validate(p)?;
        match p.is_legal(*self)? {
            true => Ok(()),
            false => Err(ValidateError::NotLegal),
        }
    }

    /// Returns the move source square
    #[inline]
    pub const fn src(&self) -> Coord {
        self.src
    }

    /// Returns the move destination square
    #[inline]
    pub const fn dst(&self) -> Coord {
        self.dst
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}{}", self.src, self.dst)
    }
}

/// Data needed to revert a move applied with [`make_move_unchecked()`]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct RawUndo {
    src_cell: Cell,
    dst_cell: Cell,
}

impl RawUndo {
    /// Returns the piece captured by the move, if any
    #[inline]
    pub fn captured(&self) -> Option<Cell> {
        match self.dst_cell.is_occupied() {
            true => Some(self.dst_cell),
            false => None,
        }
    }
}

/// Applies the move `mv` to the board `b`
///
/// The piece moves from the source square to the destination square, replacing whatever stood
/// there, and the source square becomes empty. A pawn that reaches the last rank becomes a queen
/// of the same color.
///
/// The move is not validated and the side to move is not tracked here, so the function works on
/// plain boards. Applying moves that are not legal may leave the board in a state that is not a
/// valid position, but it can always be rolled back with [`unmake_move_unchecked()`].
pub fn make_move_unchecked(b: &mut Board, mv: Move) -> RawUndo {
    let src_cell = b.get(mv.src);
    let dst_cell = b.get(mv.dst);
    let moved = match src_cell.parts() {
        Some((color, Piece::Pawn)) if mv.dst.rank() == geometry::promote_dst_rank(color) => {
            Cell::from_parts(color, Piece::Queen)
        }
        _ => src_cell,
    };
    b.put(mv.dst, moved);
    b.put(mv.src, Cell::EMPTY);
    RawUndo { src_cell, dst_cell }
}

/// Unmakes the move `mv` on the board `b`
///
/// `u` must be the value returned by the corresponding call to [`make_move_unchecked()`], and
/// no other changes must be made to the board in between. Then the board is restored exactly.
pub fn unmake_move_unchecked(b: &mut Board, mv: Move, u: RawUndo) {
    b.put(mv.src, u.src_cell);
    b.put(mv.dst, u.dst_cell);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, File, Rank};

    #[test]
    fn test_create() {
        let mv = Move::from_row_col((6, 4), (4, 4)).unwrap();
        assert_eq!(mv.src(), Coord::from_parts(File::E, Rank::R2));
        assert_eq!(mv.dst(), Coord::from_parts(File::E, Rank::R4));
        assert_eq!(mv.row_col(), ((6, 4), (4, 4)));
        assert_eq!(mv.to_string(), "e2e4");

        assert_eq!(
            Move::from_row_col((-1, 0), (0, 0)),
            Err(CreateError::OutOfBounds(CoordError::OutOfBounds {
                row: -1,
                col: 0
            }))
        );
        assert_eq!(
            Move::from_row_col((0, 0), (3, 8)),
            Err(CreateError::OutOfBounds(CoordError::OutOfBounds {
                row: 3,
                col: 8
            }))
        );
    }

    #[test]
    fn test_validate() {
        let pos = Position::initial();
        let mv = Move::from_uci("e2e4").unwrap();
        assert!(mv.is_semilegal(&pos));
        assert_eq!(mv.validate(&pos), Ok(()));

        for s in ["e2e5", "e7e5", "e3e4", "b1d2", "a1a2", "e1e2"] {
            let mv = Move::from_uci(s).unwrap();
            assert_eq!(mv.validate(&pos), Err(ValidateError::NotSemiLegal), "{}", s);
        }

        // Knight is pinned
        let pos = Position::from_fen("k3r3/8/8/8/8/8/4N3/4K3 w").unwrap();
        let mv = Move::from_uci("e2c3").unwrap();
        assert_eq!(mv.semi_validate(&pos), Ok(()));
        assert_eq!(mv.validate(&pos), Err(ValidateError::NotLegal));

        let board = Board::from_fen("k7/8/8/8/8/8/4N3/8").unwrap();
        let pos = Position::new(board, Color::White);
        assert_eq!(
            mv.validate(&pos),
            Err(ValidateError::Position(movegen::Error::MissingKing(
                Color::White
            )))
        );
    }

    #[test]
    fn test_make_unmake() {
        let mut board = Board::initial();
        let mv = Move::from_uci("g1f3").unwrap();
        let u = make_move_unchecked(&mut board, mv);
        assert_eq!(u.captured(), None);
        assert!(board.get2(File::G, Rank::R1).is_empty());
        assert_eq!(
            board.get2(File::F, Rank::R3),
            Cell::from_parts(Color::White, Piece::Knight)
        );
        unmake_move_unchecked(&mut board, mv, u);
        assert_eq!(board, Board::initial());
    }

    #[test]
    fn test_capture() {
        let mut board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3").unwrap();
        let saved = board;
        let mv = Move::from_uci("e4d5").unwrap();
        let u = make_move_unchecked(&mut board, mv);
        assert_eq!(u.captured(), Some(Cell::from_parts(Color::Black, Piece::Pawn)));
        assert_eq!(board.to_string(), "4k3/8/8/3P4/8/8/8/4K3");
        unmake_move_unchecked(&mut board, mv, u);
        assert_eq!(board, saved);
    }

    #[test]
    fn test_promote() {
        let mut board = Board::from_fen("1n2k3/P7/8/8/8/8/6p1/4K2R").unwrap();
        let saved = board;

        let mv = Move::from_uci("a7a8").unwrap();
        let u = make_move_unchecked(&mut board, mv);
        assert_eq!(
            board.get2(File::A, Rank::R8),
            Cell::from_parts(Color::White, Piece::Queen)
        );
        unmake_move_unchecked(&mut board, mv, u);
        assert_eq!(board, saved);

        let mv = Move::from_uci("a7b8").unwrap();
        let _ = make_move_unchecked(&mut board, mv);
        assert_eq!(
            board.get2(File::B, Rank::R8),
            Cell::from_parts(Color::White, Piece::Queen)
        );

        let mv = Move::from_uci("g2h1").unwrap();
        let u = make_move_unchecked(&mut board, mv);
        assert_eq!(u.captured(), Some(Cell::from_parts(Color::White, Piece::Rook)));
        assert_eq!(
            board.get2(File::H, Rank::R1),
            Cell::from_parts(Color::Black, Piece::Queen)
        );

        // Pieces other than pawns are not promoted
        let mut board = Board::from_fen("4k3/R7/8/8/8/8/8/4K3").unwrap();
        let _ = make_move_unchecked(&mut board, Move::from_uci("a7a8").unwrap());
        assert_eq!(
            board.get2(File::A, Rank::R8),
            Cell::from_parts(Color::White, Piece::Rook)
        );
    }
}
