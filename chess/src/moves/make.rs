//! Checked application of moves to positions

use super::base::{self, Move, RawUndo, ValidateError};
use super::uci;
use crate::board::Position;

use std::convert::Infallible;

use log::debug;

/// Something that can be applied to a position as a move
///
/// Unlike [`Position::apply()`], implementors pass the turn to the opponent after the move is
/// made. Rejected moves leave the position untouched.
pub trait Make {
    type Err;

    /// Applies the move in place
    ///
    /// Returns the applied move together with the data to revert it via [`unmake_raw()`].
    fn make_raw(&self, pos: &mut Position) -> Result<(Move, RawUndo), Self::Err>;

    /// Returns a copy of `pos` with the move applied
    fn make(&self, pos: &Position) -> Result<Position, Self::Err> {
        let mut cloned = *pos;
        let _ = self.make_raw(&mut cloned)?;
        Ok(cloned)
    }
}

/// Reverts the move applied via [`Make::make_raw()`]
pub fn unmake_raw(pos: &mut Position, mv: Move, u: RawUndo) {
    pos.flip_side();
    base::unmake_move_unchecked(pos.board_mut(), mv, u);
}

fn apply_and_flip(pos: &mut Position, mv: Move) -> RawUndo {
    let u = base::make_move_unchecked(pos.board_mut(), mv);
    pos.flip_side();

    #[cfg(feature = "selftest")]
    assert_eq!(pos.validate(), Ok(()), "invalid position after move {}", mv);

    u
}

/// Move which is applied without any validation
pub struct Unchecked(pub Move);

impl Make for Unchecked {
    type Err = Infallible;

    #[inline]
    fn make_raw(&self, pos: &mut Position) -> Result<(Move, RawUndo), Self::Err> {
        Ok((self.0, apply_and_flip(pos, self.0)))
    }
}

impl Make for Move {
    type Err = ValidateError;

    fn make_raw(&self, pos: &mut Position) -> Result<(Move, RawUndo), Self::Err> {
        if let Err(e) = self.validate(pos) {
            debug!("rejecting move {} in {}: {}", self, pos, e);
            return Err(e);
        }
        Ok((*self, apply_and_flip(pos, *self)))
    }
}

/// Move in UCI format, validated against the position before applying
pub struct Uci<S: AsRef<str>>(pub S);

impl<S: AsRef<str>> Make for Uci<S> {
    type Err = uci::ParseError;

    fn make_raw(&self, pos: &mut Position) -> Result<(Move, RawUndo), Self::Err> {
        let mv = match Move::from_uci_legal(self.0.as_ref(), pos) {
            Ok(mv) => mv,
            Err(e) => {
                debug!("rejecting move {:?} in {}: {}", self.0.as_ref(), pos, e);
                return Err(e);
            }
        };
        Ok((mv, apply_and_flip(pos, mv)))
    }
}
