//! Board, position and related things

use crate::movegen::{self, Filter, MoveList};
use crate::moves::{self, Make, Move, RawUndo};
use crate::squares::SquareSet;
use crate::types::{self, Cell, Color, Coord, File, Outcome, Piece, Rank, Status};
use crate::{eval, legal};

use std::fmt::{self, Display};
use std::str::FromStr;

use thiserror::Error;

/// Position validation error
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ValidateError {
    /// Too many pieces of given color
    ///
    /// No more than 16 pieces of each color is allowed.
    #[error("too many pieces of color {0:?}")]
    TooManyPieces(Color),
    /// One of the sides doesn't have a king
    #[error("no king of color {0:?}")]
    NoKing(Color),
    /// One of the sides has more than one king
    #[error("more than one king of color {0:?}")]
    TooManyKings(Color),
}

/// Error parsing the piece placement part of FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum CellsParseError {
    /// Rank is too large
    #[error("too many items in rank {0}")]
    RankOverflow(Rank),
    /// Rank is too small
    #[error("not enough items in rank {0}")]
    RankUnderflow(Rank),
    /// Too many ranks
    #[error("too many ranks")]
    Overflow,
    /// Not enough ranks
    #[error("not enough ranks")]
    Underflow,
    /// Unexpected character
    #[error("unexpected char {0:?}")]
    UnexpectedChar(char),
}

/// Error parsing [`Position`] from FEN
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum FenParseError {
    /// FEN contains non-ASCII characters
    #[error("non-ASCII data in FEN")]
    NonAscii,
    /// FEN doesn't have board part
    #[error("board not specified")]
    NoBoard,
    /// Error parsing board from FEN
    #[error("bad board: {0}")]
    Board(#[from] CellsParseError),
    /// FEN doesn't have move side part
    #[error("no move side")]
    NoMoveSide,
    /// Error parsing move side from FEN
    #[error("bad move side: {0}")]
    MoveSide(#[from] types::ColorError),
    /// Board was parsed, but it's invalid
    #[error("invalid position: {0}")]
    Valid(#[from] ValidateError),
}

/// 8×8 grid of cells
///
/// The board knows nothing about the side to move, see [`Position`] for that. Cells are stored
/// row by row, row 0 being rank 8.
///
/// # Example
///
/// ```
/// # use neuroboard::{Board, File, Rank, Color, Piece, Cell};
/// #
/// let mut board = Board::empty();
/// board.put2(File::B, Rank::R2, Cell::from_parts(Color::White, Piece::King));
/// board.put2(File::D, Rank::R5, Cell::from_parts(Color::Black, Piece::King));
/// assert_eq!(board.to_string(), "8/8/8/3k4/8/8/1K6/8");
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board {
    /// Contents of the board, indexed by [`Coord::index()`]
    pub cells: [Cell; 64],
}

impl Board {
    /// Returns a board without any pieces
    #[inline]
    pub const fn empty() -> Board {
        Board {
            cells: [Cell::EMPTY; 64],
        }
    }

    /// Returns a board with the standard initial arrangement
    pub fn initial() -> Board {
        let mut res = Board::empty();
        for file in File::iter() {
            res.put2(file, Rank::R2, Cell::from_parts(Color::White, Piece::Pawn));
            res.put2(file, Rank::R7, Cell::from_parts(Color::Black, Piece::Pawn));
        }
        for (color, rank) in [(Color::White, Rank::R1), (Color::Black, Rank::R8)] {
            res.put2(File::A, rank, Cell::from_parts(color, Piece::Rook));
            res.put2(File::B, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::C, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::D, rank, Cell::from_parts(color, Piece::Queen));
            res.put2(File::E, rank, Cell::from_parts(color, Piece::King));
            res.put2(File::F, rank, Cell::from_parts(color, Piece::Bishop));
            res.put2(File::G, rank, Cell::from_parts(color, Piece::Knight));
            res.put2(File::H, rank, Cell::from_parts(color, Piece::Rook));
        }
        res
    }

    /// Returns the contents of the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.cells[c.index()]
    }

    /// Returns the contents of the square with file `file` and rank `rank`
    #[inline]
    pub fn get2(&self, file: File, rank: Rank) -> Cell {
        self.get(Coord::from_parts(file, rank))
    }

    /// Puts `cell` to the square with coordinate `c`
    #[inline]
    pub fn put(&mut self, c: Coord, cell: Cell) {
        self.cells[c.index()] = cell;
    }

    /// Puts `cell` to the square with file `file` and rank `rank`
    #[inline]
    pub fn put2(&mut self, file: File, rank: Rank, cell: Cell) {
        self.put(Coord::from_parts(file, rank), cell);
    }

    /// Iterates over all the occupied squares together with their contents
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        Coord::iter()
            .map(|c| (c, self.get(c)))
            .filter(|(_, cell)| cell.is_occupied())
    }

    /// Returns the set of squares occupied by the pieces of color `c`
    pub fn color(&self, c: Color) -> SquareSet {
        self.occupied()
            .filter(|(_, cell)| cell.color() == Some(c))
            .map(|(coord, _)| coord)
            .collect()
    }

    /// Returns the set of squares occupied by `cell`
    pub fn piece(&self, cell: Cell) -> SquareSet {
        Coord::iter().filter(|&c| self.get(c) == cell).collect()
    }

    /// Returns the position of the king of color `c`, scanning the board row by row
    ///
    /// If there is more than one such king, the first one found is returned.
    pub fn king_pos(&self, c: Color) -> Option<Coord> {
        let king = Cell::from_parts(c, Piece::King);
        Coord::iter().find(|&coord| self.get(coord) == king)
    }

    /// Parses the piece placement part of FEN
    #[inline]
    pub fn from_fen(s: &str) -> Result<Board, CellsParseError> {
        Board::from_str(s)
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Board {
        Board::empty()
    }
}

/// Board together with the side to move
///
/// A position is the unit of ownership for a single game. It is a plain value of fixed size, so
/// cloning it is cheap: hypothetical lines of play should each work on their own copy.
///
/// Positions created via [`Position::from_fen()`] or [`Position::initial()`] have exactly one
/// king of each color. [`Position::new()`] doesn't check that, and operations that need the king
/// of the side to move return [`movegen::Error::MissingKing`] on such a corrupted position.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side: Color,
}

impl Position {
    /// Creates a position from its parts without validation
    ///
    /// Use [`Position::validate()`] to check the result.
    #[inline]
    pub const fn new(board: Board, side: Color) -> Position {
        Position { board, side }
    }

    /// Returns the initial position, White to move
    pub fn initial() -> Position {
        Position::new(Board::initial(), Color::White)
    }

    /// Parses a position from FEN
    ///
    /// Only the piece placement and the side to move are required. The remaining FEN fields
    /// (castling, en passant and move counters) are accepted and ignored, as these rules don't
    /// track them.
    #[inline]
    pub fn from_fen(fen: &str) -> Result<Position, FenParseError> {
        Position::from_str(fen)
    }

    /// Checks that each side has exactly one king and at most 16 pieces
    pub fn validate(&self) -> Result<(), ValidateError> {
        for color in [Color::White, Color::Black] {
            if self.board.color(color).len() > 16 {
                return Err(ValidateError::TooManyPieces(color));
            }
            match self.board.piece(Cell::from_parts(color, Piece::King)).len() {
                0 => return Err(ValidateError::NoKing(color)),
                1 => {}
                _ => return Err(ValidateError::TooManyKings(color)),
            }
        }
        Ok(())
    }

    /// Returns the board
    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the board for editing
    ///
    /// Nothing prevents removing a king here. The position is not validated afterwards.
    #[inline]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Returns the contents of the square with coordinate `c`
    #[inline]
    pub fn get(&self, c: Coord) -> Cell {
        self.board.get(c)
    }

    /// Returns side to move
    #[inline]
    pub fn side(&self) -> Color {
        self.side
    }

    #[inline]
    pub fn set_side(&mut self, side: Color) {
        self.side = side;
    }

    /// Passes the turn to the other side without changing the board
    #[inline]
    pub fn flip_side(&mut self) {
        self.side = self.side.inv();
    }

    /// Returns the position of the king of the side to move
    pub fn king_pos(&self) -> Result<Coord, movegen::Error> {
        self.board
            .king_pos(self.side)
            .ok_or(movegen::Error::MissingKing(self.side))
    }

    /// Returns all the legal moves of the side to move
    #[inline]
    pub fn legal_moves(&self) -> Result<MoveList, movegen::Error> {
        movegen::legal_moves(self)
    }

    /// Returns the moves of the piece standing on `coord`
    ///
    /// See [`movegen::piece_moves()`] for details.
    #[inline]
    pub fn piece_moves(&self, coord: Coord, filter: Filter) -> Result<MoveList, movegen::Error> {
        movegen::piece_moves(self, coord, filter)
    }

    /// Returns `true` if the side to move has at least one legal move
    #[inline]
    pub fn has_legal_moves(&self) -> Result<bool, movegen::Error> {
        movegen::has_legal_moves(self)
    }

    /// Returns `true` if the side to move is in check
    #[inline]
    pub fn is_check(&self) -> Result<bool, movegen::Error> {
        movegen::in_check(self)
    }

    /// Returns `true` if the side to move has no legal moves, i.e. the game is over
    #[inline]
    pub fn is_terminal(&self) -> Result<bool, movegen::Error> {
        Ok(!self.has_legal_moves()?)
    }

    /// Calculates the current state of the game
    ///
    /// This function can be computationally expensive, as it needs to find out whether there
    /// are legal moves.
    pub fn status(&self) -> Result<Status, movegen::Error> {
        let check = self.is_check()?;
        let has_moves = self.has_legal_moves()?;
        Ok(match (check, has_moves) {
            (false, true) => Status::Ongoing,
            (true, true) => Status::Check,
            (true, false) => Status::Checkmate,
            (false, false) => Status::Stalemate,
        })
    }

    /// Calculates the outcome of the game, if it's over
    #[inline]
    pub fn calc_outcome(&self) -> Result<Option<Outcome>, movegen::Error> {
        Ok(self.status()?.outcome(self.side))
    }

    /// Returns `true` if `mv` is legal in this position
    #[inline]
    pub fn is_legal(&self, mv: Move) -> Result<bool, movegen::Error> {
        if !mv.is_semilegal(self) {
            return Ok(false);
        }
        legal::is_legal(self, mv)
    }

    /// Applies `mv` in place without any validation and without passing the turn
    ///
    /// Returns the data needed to revert the move with [`Position::undo()`].
    #[inline]
    pub fn apply(&mut self, mv: Move) -> RawUndo {
        moves::make_move_unchecked(&mut self.board, mv)
    }

    /// Reverts the move applied with [`Position::apply()`]
    #[inline]
    pub fn undo(&mut self, mv: Move, u: RawUndo) {
        moves::unmake_move_unchecked(&mut self.board, mv, u);
    }

    /// Returns a copy of the position with `mv` applied, without any validation and without
    /// passing the turn
    #[inline]
    pub fn applied(&self, mv: Move) -> Position {
        let mut res = *self;
        let _ = res.apply(mv);
        res
    }

    /// Convenience alias for [`moves::Make::make`](crate::moves::Make::make)
    ///
    /// Unlike [`Position::applied()`], the move is validated and the turn passes to the opponent.
    pub fn make_move<M: Make>(&self, m: M) -> Result<Self, M::Err> {
        m.make(self)
    }

    /// Static evaluation of the position, positive values favor White
    #[inline]
    pub fn evaluate(&self) -> i32 {
        eval::evaluate(&self.board)
    }

    /// Wraps the position to allow pretty-printing with the given style `Style`
    ///
    /// The resulting wrapper implements [`fmt::Display`], so can be used with
    /// `write!()`, `println!()`, or `ToString::to_string`.
    ///
    /// # Example
    ///
    /// ```
    /// # use neuroboard::{Position, board::PrettyStyle};
    /// #
    /// let p = Position::initial();
    ///
    /// let res = r#"
    /// 8|rnbqkbnr
    /// 7|pppppppp
    /// 6|........
    /// 5|........
    /// 4|........
    /// 3|........
    /// 2|PPPPPPPP
    /// 1|RNBQKBNR
    /// -+--------
    /// W|abcdefgh
    /// "#;
    /// assert_eq!(p.pretty(PrettyStyle::Ascii).to_string().trim(), res.trim());
    /// ```
    #[inline]
    pub fn pretty(&self, style: PrettyStyle) -> Pretty<'_> {
        Pretty { pos: self, style }
    }

    /// Converts the position into a FEN-like string with piece placement and side to move
    #[inline]
    pub fn as_fen(&self) -> String {
        self.to_string()
    }
}

impl TryFrom<(Board, Color)> for Position {
    type Error = ValidateError;

    fn try_from((board, side): (Board, Color)) -> Result<Position, ValidateError> {
        let res = Position::new(board, side);
        res.validate()?;
        Ok(res)
    }
}

/// Style for [`Position::pretty()`]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PrettyStyle {
    /// Print pieces and frames as ASCII characters
    Ascii,
    /// Print pieces and frames as fancy Unicode characters
    Utf8,
}

/// Wrapper to pretty-print the position
///
/// See docs for [`Position::pretty()`] for more details.
pub struct Pretty<'a> {
    pos: &'a Position,
    style: PrettyStyle,
}

fn parse_cells(s: &str) -> Result<[Cell; 64], CellsParseError> {
    type Error = CellsParseError;

    let mut file = 0_usize;
    let mut rank = 0_usize;
    let mut pos = 0_usize;
    let mut cells = [Cell::EMPTY; 64];
    for b in s.bytes() {
        match b {
            b'1'..=b'8' => {
                let add = (b - b'0') as usize;
                if file + add > 8 {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                file += add;
                pos += add;
            }
            b'/' => {
                if file < 8 {
                    return Err(Error::RankUnderflow(Rank::from_index(rank)));
                }
                rank += 1;
                file = 0;
                if rank >= 8 {
                    return Err(Error::Overflow);
                }
            }
            _ => {
                if file >= 8 {
                    return Err(Error::RankOverflow(Rank::from_index(rank)));
                }
                cells[pos] = match b {
                    b'.' => return Err(Error::UnexpectedChar('.')),
                    _ => Cell::from_char(b as char).ok_or(Error::UnexpectedChar(b as char))?,
                };
                file += 1;
                pos += 1;
            }
        };
    }

    if file < 8 {
        return Err(Error::RankUnderflow(Rank::from_index(rank)));
    }
    if rank < 7 {
        return Err(Error::Underflow);
    }

    Ok(cells)
}

impl FromStr for Board {
    type Err = CellsParseError;

    fn from_str(s: &str) -> Result<Board, Self::Err> {
        Ok(Board {
            cells: parse_cells(s)?,
        })
    }
}

impl FromStr for Position {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Position, Self::Err> {
        type Error = FenParseError;

        if !s.is_ascii() {
            return Err(Error::NonAscii);
        }
        let mut iter = s.split_ascii_whitespace();

        let board = Board::from_str(iter.next().ok_or(Error::NoBoard)?)?;
        let side = Color::from_str(iter.next().ok_or(Error::NoMoveSide)?)?;

        Ok(Position::try_from((board, side))?)
    }
}

fn format_cells(cells: &[Cell; 64], f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
    for rank in Rank::iter() {
        if rank.index() != 0 {
            write!(f, "/")?;
        }
        let mut empty = 0;
        for file in File::iter() {
            let cell = cells[Coord::from_parts(file, rank).index()];
            if cell.is_empty() {
                empty += 1;
                continue;
            }
            if empty != 0 {
                write!(f, "{}", (b'0' + empty) as char)?;
                empty = 0;
            }
            write!(f, "{}", cell)?;
        }
        if empty != 0 {
            write!(f, "{}", (b'0' + empty) as char)?;
        }
    }
    Ok(())
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        format_cells(&self.cells, f)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{} {}", self.board, self.side)
    }
}

trait StyleTable {
    const HORZ_FRAME: char;
    const VERT_FRAME: char;
    const ANGLE_FRAME: char;
    const WHITE_INDICATOR: char;
    const BLACK_INDICATOR: char;

    fn cell(c: Cell) -> char;

    fn indicator(c: Color) -> char {
        match c {
            Color::White => Self::WHITE_INDICATOR,
            Color::Black => Self::BLACK_INDICATOR,
        }
    }

    fn fmt(p: &Position, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for rank in Rank::iter() {
            write!(f, "{}{}", rank, Self::VERT_FRAME)?;
            for file in File::iter() {
                write!(f, "{}", Self::cell(p.board.get2(file, rank)))?;
            }
            writeln!(f)?;
        }
        write!(f, "{}{}", Self::HORZ_FRAME, Self::ANGLE_FRAME)?;
        for _ in File::iter() {
            write!(f, "{}", Self::HORZ_FRAME)?;
        }
        writeln!(f)?;
        write!(f, "{}{}", Self::indicator(p.side), Self::VERT_FRAME)?;
        for file in File::iter() {
            write!(f, "{}", file)?;
        }
        writeln!(f)?;
        Ok(())
    }
}

struct AsciiStyleTable;
struct Utf8StyleTable;

impl StyleTable for AsciiStyleTable {
    const HORZ_FRAME: char = '-';
    const VERT_FRAME: char = '|';
    const ANGLE_FRAME: char = '+';
    const WHITE_INDICATOR: char = 'W';
    const BLACK_INDICATOR: char = 'B';

    fn cell(c: Cell) -> char {
        c.as_char()
    }
}

impl StyleTable for Utf8StyleTable {
    const HORZ_FRAME: char = '─';
    const VERT_FRAME: char = '│';
    const ANGLE_FRAME: char = '┼';
    const WHITE_INDICATOR: char = '○';
    const BLACK_INDICATOR: char = '●';

    fn cell(c: Cell) -> char {
        c.as_utf8_char()
    }
}

impl<'a> Display for Pretty<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match self.style {
            PrettyStyle::Ascii => AsciiStyleTable::fmt(self.pos, f),
            PrettyStyle::Utf8 => Utf8StyleTable::fmt(self.pos, f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem;

    const INI_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

    #[test]
    fn test_size() {
        assert_eq!(mem::size_of::<Board>(), 64);
        assert_eq!(mem::size_of::<Position>(), 65);
    }

    #[test]
    fn test_initial() {
        assert_eq!(Position::initial().to_string(), INI_FEN);
        assert_eq!(Position::from_str(INI_FEN), Ok(Position::initial()));
        assert_eq!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Ok(Position::initial())
        );
        assert_eq!(Position::initial().side(), Color::White);
        assert_eq!(Position::initial().validate(), Ok(()));
    }

    #[test]
    fn test_grid_layout() {
        let b = Board::initial();
        // Row 0 is rank 8, column 0 is file a
        assert_eq!(
            b.get(Coord::from_row_col(0, 0).unwrap()),
            Cell::from_parts(Color::Black, Piece::Rook)
        );
        assert_eq!(
            b.get(Coord::from_row_col(7, 4).unwrap()),
            Cell::from_parts(Color::White, Piece::King)
        );
        assert_eq!(
            b.get(Coord::from_row_col(6, 3).unwrap()),
            Cell::from_parts(Color::White, Piece::Pawn)
        );
        assert!(b.get(Coord::from_row_col(4, 4).unwrap()).is_empty());
        assert_eq!(b.color(Color::White).len(), 16);
        assert_eq!(b.color(Color::Black).len(), 16);
    }

    #[test]
    fn test_midgame() {
        const FEN: &str = "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w";

        let pos = Position::from_fen(FEN).unwrap();
        assert_eq!(pos.as_fen(), FEN);
        assert_eq!(
            pos.board().get2(File::B, Rank::R4),
            Cell::from_parts(Color::Black, Piece::Bishop)
        );
        assert_eq!(
            pos.board().get2(File::F, Rank::R2),
            Cell::from_parts(Color::White, Piece::Queen)
        );
        assert_eq!(pos.king_pos(), Ok(Coord::from_parts(File::H, Rank::R1)));
        assert_eq!(
            pos.board().king_pos(Color::Black),
            Some(Coord::from_parts(File::G, Rank::R8))
        );
    }

    #[test]
    fn test_bad_fen() {
        assert_eq!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"),
            Err(FenParseError::NoMoveSide)
        );
        assert_eq!(Position::from_fen(""), Err(FenParseError::NoBoard));
        assert_eq!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w"),
            Err(FenParseError::Board(CellsParseError::Underflow))
        );
        assert_eq!(
            Position::from_fen("rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(FenParseError::Board(CellsParseError::RankOverflow(Rank::R7)))
        );
        assert_eq!(
            Position::from_fen("rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
            Err(FenParseError::Board(CellsParseError::UnexpectedChar('x')))
        );
        assert_eq!(
            Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x"),
            Err(FenParseError::MoveSide(types::ColorError::UnexpectedChar('x')))
        );
        assert_eq!(
            Position::from_fen("8/8/8/8/8/8/8/4K3 w"),
            Err(FenParseError::Valid(ValidateError::NoKing(Color::Black)))
        );
        assert_eq!(
            Position::from_fen("k7/8/8/8/8/8/8/3KK3 w"),
            Err(FenParseError::Valid(ValidateError::TooManyKings(Color::White)))
        );
        assert_eq!(
            Position::from_fen("k7/8/8/8/8/QQQQQQQQ/QQQQQQQQ/QQQQKQQQ w"),
            Err(FenParseError::Valid(ValidateError::TooManyPieces(Color::White)))
        );
    }

    #[test]
    fn test_unvalidated() {
        let board = Board::from_fen("8/8/8/8/8/8/8/4K3").unwrap();
        let pos = Position::new(board, Color::Black);
        assert_eq!(pos.validate(), Err(ValidateError::NoKing(Color::Black)));
        assert_eq!(pos.king_pos(), Err(movegen::Error::MissingKing(Color::Black)));
    }

    #[test]
    fn test_apply_undo() {
        let pos = Position::initial();
        let mv = Move::from_uci("g1f3").unwrap();
        let moved = pos.applied(mv);
        assert_eq!(moved.side(), Color::White);
        assert_eq!(moved.get("f3".parse().unwrap()), pos.get("g1".parse().unwrap()));

        let mut back = moved;
        let u = back.apply(Move::from_uci("f3g1").unwrap());
        assert_eq!(back, pos);
        back.undo(Move::from_uci("f3g1").unwrap(), u);
        assert_eq!(back, moved);
    }

    #[test]
    fn test_pretty_utf8() {
        let p = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 b").unwrap();
        let res = "8│....♚...\n\
                   7│........\n\
                   6│........\n\
                   5│........\n\
                   4│........\n\
                   3│........\n\
                   2│....♙...\n\
                   1│....♔...\n\
                   ─┼────────\n\
                   ●│abcdefgh\n";
        assert_eq!(p.pretty(PrettyStyle::Utf8).to_string(), res);
    }

    #[test]
    fn test_status() {
        let pos = Position::initial();
        assert_eq!(pos.status(), Ok(Status::Ongoing));
        assert_eq!(pos.calc_outcome(), Ok(None));
        assert_eq!(pos.is_terminal(), Ok(false));

        // Fool's mate
        let pos =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w").unwrap();
        assert_eq!(pos.is_check(), Ok(true));
        assert_eq!(pos.status(), Ok(Status::Checkmate));
        assert_eq!(pos.is_terminal(), Ok(true));
        assert_eq!(
            pos.calc_outcome(),
            Ok(Some(Outcome::Checkmate {
                winner: Color::Black
            }))
        );

        let pos = Position::from_fen("7K/8/5n2/5n2/8/8/7k/8 w").unwrap();
        assert_eq!(pos.is_check(), Ok(false));
        assert_eq!(pos.status(), Ok(Status::Stalemate));
        assert_eq!(pos.calc_outcome(), Ok(Some(Outcome::Stalemate)));

        let pos = Position::from_fen("4k3/8/8/8/8/8/8/r3K3 w").unwrap();
        assert_eq!(pos.status(), Ok(Status::Check));
    }
}
