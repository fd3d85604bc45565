//! Legality checks for pseudo-legal moves

use crate::board::{Board, Position};
use crate::movegen::{self, Error};
use crate::moves::Move;
use crate::types::{Cell, Color, Coord};

/// Checks whether pseudo-legal moves leave the mover's king attacked
///
/// The checker owns a copy of the board. Each move is played on that copy, the king square is
/// tested against the opponent's pseudo-legal moves, and the two touched squares are restored.
/// The position the checker was created from is never mutated, so many checkers may work from
/// the same position at once.
#[derive(Clone, Debug)]
pub struct Checker {
    board: Board,
    side: Color,
    king: Coord,
}

struct Undo {
    src_cell: Cell,
    dst_cell: Cell,
}

impl Checker {
    /// Creates a checker for the side to move in `pos`
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingKing`] if the side to move has no king.
    pub fn new(pos: &Position) -> Result<Checker, Error> {
        Ok(Checker {
            board: *pos.board(),
            side: pos.side(),
            king: pos.king_pos()?,
        })
    }

    // Promotions are not applied here, as the promoted piece occupies the same square.
    fn make_move(&mut self, mv: Move) -> Undo {
        let src_cell = self.board.get(mv.src());
        let dst_cell = self.board.get(mv.dst());
        self.board.put(mv.dst(), src_cell);
        self.board.put(mv.src(), Cell::EMPTY);
        Undo { src_cell, dst_cell }
    }

    fn unmake_move(&mut self, mv: Move, u: Undo) {
        self.board.put(mv.src(), u.src_cell);
        self.board.put(mv.dst(), u.dst_cell);
    }

    /// Returns `true` if `mv` doesn't leave the king attacked
    ///
    /// `mv` is expected to be pseudo-legal for the side to move. Other moves give meaningless
    /// results, but still leave the checker intact.
    pub fn is_legal(&mut self, mv: Move) -> bool {
        #[cfg(feature = "selftest")]
        let saved = self.board;

        let king = if mv.src() == self.king {
            mv.dst()
        } else {
            self.king
        };
        let u = self.make_move(mv);
        let res = !movegen::is_cell_attacked(&self.board, king, self.side.inv());
        self.unmake_move(mv, u);

        #[cfg(feature = "selftest")]
        assert_eq!(self.board, saved, "board changed after checking {}", mv);

        res
    }
}

/// Returns `true` if the pseudo-legal move `mv` doesn't leave the king of the side to move
/// attacked
pub fn is_legal(pos: &Position, mv: Move) -> Result<bool, Error> {
    Ok(Checker::new(pos)?.is_legal(mv))
}
