//! Move generation and check detection

use crate::squares::SquareSet;
use crate::board::{Board, Position};
use crate::legal::Checker;
use crate::moves::Move;
use crate::types::{Color, Coord, Piece};
use crate::{generic, geometry};

use std::convert::Infallible;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut};
use std::slice;

use arrayvec::ArrayVec;
use log::trace;
use thiserror::Error;

/// Maximum number of pieces of one color for which full move lists are generated
pub const MAX_PIECES: u32 = 16;

/// Error generating moves
///
/// Both variants mean that the position is corrupted, as they cannot happen in positions that
/// pass [`Position::validate()`].
#[derive(Debug, Copy, Clone, Error, Eq, PartialEq)]
pub enum Error {
    /// The king of the given color is not on the board
    #[error("king of color {0:?} not found on the board")]
    MissingKing(Color),
    /// The given color has too many pieces to generate all of their moves
    #[error("more than 16 pieces of color {0:?}")]
    TooManyPieces(Color),
}

/// Whether the generated moves are filtered for legality
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Filter {
    /// Return only the moves which don't leave the mover's own king attacked
    #[default]
    Legal,
    /// Return all the moves allowed by the piece movement rules
    PseudoLegal,
}

trait MaybeMovePush {
    type Err;

    fn push(&mut self, m: Move) -> Result<(), Self::Err>;
}

/// List of moves
///
/// Holds up to 512 moves, which is enough for any position with at most [`MAX_PIECES`] pieces of
/// the side to move.
#[derive(Default, Debug, Clone, Eq, PartialEq)]
pub struct MoveList(ArrayVec<Move, 512>);

impl Deref for MoveList {
    type Target = ArrayVec<Move, 512>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for MoveList {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a mut MoveList {
    type Item = &'a mut Move;
    type IntoIter = slice::IterMut<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter_mut()
    }
}

impl MoveList {
    pub fn new() -> MoveList {
        MoveList(ArrayVec::new())
    }
}

/// Sink for generated moves
pub trait MovePush {
    fn push(&mut self, m: Move);
}

impl<const N: usize> MovePush for ArrayVec<Move, N> {
    fn push(&mut self, m: Move) {
        self.push(m);
    }
}

impl MovePush for MoveList {
    fn push(&mut self, m: Move) {
        self.0.push(m);
    }
}

impl MovePush for Vec<Move> {
    fn push(&mut self, m: Move) {
        self.push(m);
    }
}

impl<T: MovePush> MaybeMovePush for T {
    type Err = Infallible;

    fn push(&mut self, m: Move) -> Result<(), Self::Err> {
        <Self as MovePush>::push(self, m);
        Ok(())
    }
}

/// Collects the destination squares of all the moves
struct Targets(SquareSet);

impl MovePush for Targets {
    fn push(&mut self, m: Move) {
        self.0.insert(m.dst());
    }
}

/// Stops the generation as soon as some move lands on `target`
struct HitTarget(Coord);

impl MaybeMovePush for HitTarget {
    type Err = ();

    fn push(&mut self, m: Move) -> Result<(), ()> {
        match m.dst() == self.0 {
            true => Err(()),
            false => Ok(()),
        }
    }
}

struct ErrOnFirst;

impl MaybeMovePush for ErrOnFirst {
    type Err = ();

    fn push(&mut self, _mv: Move) -> Result<(), ()> {
        Err(())
    }
}

/// Passes to `inner` only the moves which don't leave the mover's king attacked
///
/// Each candidate is tried on the checker's private copy of the board, so the position the moves
/// are generated from is never touched.
struct LegalFilter<'a, P> {
    checker: Checker,
    inner: &'a mut P,
}

impl<'a, P: MaybeMovePush> LegalFilter<'a, P> {
    fn new(pos: &Position, inner: &'a mut P) -> Result<Self, Error> {
        Ok(Self {
            checker: Checker::new(pos)?,
            inner,
        })
    }
}

impl<'a, P: MaybeMovePush> MaybeMovePush for LegalFilter<'a, P> {
    type Err = P::Err;

    fn push(&mut self, mv: Move) -> Result<(), Self::Err> {
        match self.checker.is_legal(mv) {
            true => self.inner.push(mv),
            false => {
                trace!("move {} leaves the king attacked", mv);
                Ok(())
            }
        }
    }
}

struct MoveGenImpl<'a, P, C> {
    board: &'a Board,
    dst: &'a mut P,
    _c: PhantomData<C>,
}

impl<'a, P: MaybeMovePush, C: generic::Color> MoveGenImpl<'a, P, C> {
    fn new(board: &'a Board, dst: &'a mut P, _c: C) -> Self {
        MoveGenImpl {
            board,
            dst,
            _c: PhantomData,
        }
    }

    #[inline]
    fn add_move(&mut self, src: Coord, dst: Coord) -> Result<(), P::Err> {
        self.dst.push(Move::new(src, dst))
    }

    #[inline]
    fn is_empty(&self, c: Coord) -> bool {
        self.board.get(c).is_empty()
    }

    #[inline]
    fn is_enemy(&self, c: Coord) -> bool {
        self.board.get(c).color() == Some(<C::Inv as generic::Color>::COLOR)
    }

    #[inline]
    fn is_friendly(&self, c: Coord) -> bool {
        self.board.get(c).color() == Some(C::COLOR)
    }

    fn gen_pawn(&mut self, src: Coord) -> Result<(), P::Err> {
        if let Some(dst) = src.shift(C::PAWN_FORWARD, 0) {
            if self.is_empty(dst) {
                self.add_move(src, dst)?;
                if src.rank() == C::DOUBLE_MOVE_RANK {
                    if let Some(dst) = src.shift(2 * C::PAWN_FORWARD, 0) {
                        if self.is_empty(dst) {
                            self.add_move(src, dst)?;
                        }
                    }
                }
            }
        }
        for delta_col in [-1, 1] {
            if let Some(dst) = src.shift(C::PAWN_FORWARD, delta_col) {
                if self.is_enemy(dst) {
                    self.add_move(src, dst)?;
                }
            }
        }
        Ok(())
    }

    fn gen_leaper(&mut self, src: Coord, offsets: &[(isize, isize)]) -> Result<(), P::Err> {
        for &(delta_row, delta_col) in offsets {
            if let Some(dst) = src.shift(delta_row, delta_col) {
                if !self.is_friendly(dst) {
                    self.add_move(src, dst)?;
                }
            }
        }
        Ok(())
    }

    fn gen_slider(&mut self, src: Coord, directions: &[(isize, isize)]) -> Result<(), P::Err> {
        for &(delta_row, delta_col) in directions {
            let mut cur = src;
            while let Some(dst) = cur.shift(delta_row, delta_col) {
                if self.is_friendly(dst) {
                    break;
                }
                self.add_move(src, dst)?;
                if self.is_enemy(dst) {
                    break;
                }
                cur = dst;
            }
        }
        Ok(())
    }

    fn gen_piece(&mut self, src: Coord) -> Result<(), P::Err> {
        let piece = match self.board.get(src).parts() {
            Some((color, piece)) if color == C::COLOR => piece,
            _ => return Ok(()),
        };
        match piece {
            Piece::Pawn => self.gen_pawn(src),
            Piece::Knight => self.gen_leaper(src, &geometry::KNIGHT_OFFSETS),
            Piece::King => self.gen_leaper(src, &geometry::KING_OFFSETS),
            Piece::Bishop => self.gen_slider(src, &geometry::BISHOP_DIRECTIONS),
            Piece::Rook => self.gen_slider(src, &geometry::ROOK_DIRECTIONS),
            Piece::Queen => {
                self.gen_slider(src, &geometry::ROOK_DIRECTIONS)?;
                self.gen_slider(src, &geometry::BISHOP_DIRECTIONS)
            }
        }
    }

    fn gen_all(&mut self) -> Result<(), P::Err> {
        for src in Coord::iter() {
            self.gen_piece(src)?;
        }
        Ok(())
    }
}

fn gen_all_impl<P: MaybeMovePush>(b: &Board, side: Color, dst: &mut P) -> Result<(), P::Err> {
    match side {
        Color::White => MoveGenImpl::new(b, dst, generic::White).gen_all(),
        Color::Black => MoveGenImpl::new(b, dst, generic::Black).gen_all(),
    }
}

fn gen_piece_impl<P: MaybeMovePush>(
    b: &Board,
    side: Color,
    src: Coord,
    dst: &mut P,
) -> Result<(), P::Err> {
    match side {
        Color::White => MoveGenImpl::new(b, dst, generic::White).gen_piece(src),
        Color::Black => MoveGenImpl::new(b, dst, generic::Black).gen_piece(src),
    }
}

fn check_piece_count(b: &Board, side: Color) -> Result<(), Error> {
    match b.color(side).len() > MAX_PIECES {
        true => Err(Error::TooManyPieces(side)),
        false => Ok(()),
    }
}

/// Generates pseudo-legal moves of the pieces of color `side` into `dst`
///
/// Squares are scanned row by row, starting from a8. Off-board destinations are silently skipped.
pub fn gen_pseudo_into<P: MovePush>(b: &Board, side: Color, dst: &mut P) {
    let _ = gen_all_impl(b, side, dst);
}

/// Generates pseudo-legal moves of the piece on `src` into `dst`
///
/// Nothing is generated if the piece on `src` doesn't have color `side`.
pub fn gen_piece_pseudo_into<P: MovePush>(b: &Board, side: Color, src: Coord, dst: &mut P) {
    let _ = gen_piece_impl(b, side, src, dst);
}

/// Generates moves of the side to move, either all pseudo-legal ones or only legal ones
///
/// With [`Filter::PseudoLegal`], the king of the side to move is not required to be on the board.
///
/// # Errors
///
/// Returns [`Error::TooManyPieces`] with either filter if the side to move has more than
/// [`MAX_PIECES`] pieces, as the moves may not fit into [`MoveList`]. Such boards can only be
/// built with [`Position::new()`]. To get all the pseudo-legal moves on them, pass a `Vec<Move>`
/// to [`gen_pseudo_into()`].
///
/// With [`Filter::Legal`], returns [`Error::MissingKing`] if the side to move has no king.
pub fn gen_moves(pos: &Position, filter: Filter) -> Result<MoveList, Error> {
    check_piece_count(&pos.board, pos.side)?;
    let mut res = MoveList::new();
    match filter {
        Filter::PseudoLegal => gen_pseudo_into(&pos.board, pos.side, &mut res),
        Filter::Legal => {
            let mut p = LegalFilter::new(pos, &mut res)?;
            let _ = gen_all_impl(&pos.board, pos.side, &mut p);
        }
    }
    Ok(res)
}

/// Returns all the legal moves of the side to move
///
/// # Example
///
/// ```
/// # use neuroboard::{movegen, Position};
/// #
/// let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w").unwrap();
/// let moves = movegen::legal_moves(&pos).unwrap();
/// assert_eq!(moves.len(), 5 + 9);
/// ```
pub fn legal_moves(pos: &Position) -> Result<MoveList, Error> {
    gen_moves(pos, Filter::Legal)
}

/// Returns the moves of the piece standing on `src`
///
/// If `src` is empty or holds a piece of the opponent, the result is empty.
pub fn piece_moves(pos: &Position, src: Coord, filter: Filter) -> Result<MoveList, Error> {
    let mut res = MoveList::new();
    match filter {
        Filter::PseudoLegal => gen_piece_pseudo_into(&pos.board, pos.side, src, &mut res),
        Filter::Legal => {
            let mut p = LegalFilter::new(pos, &mut res)?;
            let _ = gen_piece_impl(&pos.board, pos.side, src, &mut p);
        }
    }
    Ok(res)
}

/// Returns `true` if the side to move has at least one legal move
///
/// Stops on the first legal move found, so it's cheaper than checking [`legal_moves()`] for
/// emptiness.
pub fn has_legal_moves(pos: &Position) -> Result<bool, Error> {
    let mut err_on_first = ErrOnFirst;
    let mut p = LegalFilter::new(pos, &mut err_on_first)?;
    Ok(gen_all_impl(&pos.board, pos.side, &mut p).is_err())
}

/// Returns the set of squares that the pieces of color `by` can move to or capture on
///
/// Forward pawn steps are included, though they never land on an occupied square.
pub fn attacked_cells(b: &Board, by: Color) -> SquareSet {
    let mut targets = Targets(SquareSet::EMPTY);
    gen_pseudo_into(b, by, &mut targets);
    targets.0
}

/// Returns `true` if some pseudo-legal move of color `by` lands on `coord`
pub fn is_cell_attacked(b: &Board, coord: Coord, by: Color) -> bool {
    gen_all_impl(b, by, &mut HitTarget(coord)).is_err()
}

/// Returns `true` if the king of the side to move is attacked
///
/// # Errors
///
/// Returns [`Error::MissingKing`] if the side to move has no king.
pub fn in_check(pos: &Position) -> Result<bool, Error> {
    let king = pos.king_pos()?;
    Ok(is_cell_attacked(&pos.board, king, pos.side.inv()))
}
