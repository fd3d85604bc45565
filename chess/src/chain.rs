//! Game record built on top of [`Position`]

use crate::board::{self, Position};
use crate::movegen;
use crate::moves::{self, uci, Make, Move, RawUndo, Uci, ValidateError};
use crate::types::{Outcome, Status};

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot parse UCI move #{}: {}", .pos + 1, .source)]
pub struct UciParseError {
    pub pos: usize,
    pub source: uci::ParseError,
}

/// Sequence of moves applied to a starting position
///
/// The chain owns its current position and remembers the data needed to take moves back. Only
/// legal moves are accepted, and rejected moves leave the chain untouched.
///
/// # Example
///
/// ```
/// # use neuroboard::{MoveChain, Outcome, Color};
/// #
/// let mut chain = MoveChain::new_initial();
/// chain.push_uci_list("f2f3 e7e5 g2g4 d8h4").unwrap();
/// assert_eq!(
///     chain.calc_outcome().unwrap(),
///     Some(Outcome::Checkmate { winner: Color::Black }),
/// );
/// assert_eq!(chain.uci_list().to_string(), "f2f3 e7e5 g2g4 d8h4");
/// ```
#[derive(Debug, Clone)]
pub struct MoveChain {
    pos: Position,
    stack: Vec<(Move, RawUndo)>,
}

impl MoveChain {
    pub fn new(pos: Position) -> Self {
        MoveChain {
            pos,
            stack: Vec::new(),
        }
    }

    pub fn new_initial() -> Self {
        Self::new(Position::initial())
    }

    pub fn from_uci_list(pos: Position, uci_list: &str) -> Result<Self, UciParseError> {
        let mut res = MoveChain::new(pos);
        res.push_uci_list(uci_list)?;
        Ok(res)
    }

    pub fn from_fen(s: &str) -> Result<Self, board::FenParseError> {
        Ok(Self::new(Position::from_fen(s)?))
    }

    /// Returns the current position
    pub fn last(&self) -> &Position {
        &self.pos
    }

    /// Returns the position before the first move
    pub fn first(&self) -> Position {
        let mut res = self.pos;
        for &(mv, u) in self.stack.iter().rev() {
            moves::unmake_raw(&mut res, mv, u);
        }
        res
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        self.stack.iter().map(|(m, _)| *m)
    }

    pub fn get(&self, idx: usize) -> Option<Move> {
        self.stack.get(idx).map(|(m, _)| *m)
    }

    /// Returns the last move made, if any
    pub fn last_move(&self) -> Option<Move> {
        self.stack.last().map(|(m, _)| *m)
    }

    pub fn status(&self) -> Result<Status, movegen::Error> {
        self.pos.status()
    }

    pub fn calc_outcome(&self) -> Result<Option<Outcome>, movegen::Error> {
        self.pos.calc_outcome()
    }

    pub fn is_finished(&self) -> Result<bool, movegen::Error> {
        self.pos.is_terminal()
    }

    pub fn push(&mut self, mv: Move) -> Result<(), ValidateError> {
        let (mv, u) = mv.make_raw(&mut self.pos)?;
        self.stack.push((mv, u));
        Ok(())
    }

    pub fn push_uci(&mut self, s: &str) -> Result<(), uci::ParseError> {
        let (mv, u) = Uci(s).make_raw(&mut self.pos)?;
        self.stack.push((mv, u));
        Ok(())
    }

    /// Pushes whitespace-separated UCI moves
    ///
    /// Stops on the first bad move. The moves before it remain applied.
    pub fn push_uci_list(&mut self, uci_list: &str) -> Result<(), UciParseError> {
        for (pos, token) in uci_list.split_ascii_whitespace().enumerate() {
            self.push_uci(token)
                .map_err(|source| UciParseError { pos, source })?;
        }
        Ok(())
    }

    /// Takes back the last move
    pub fn pop(&mut self) -> Option<Move> {
        let (m, u) = self.stack.pop()?;
        moves::unmake_raw(&mut self.pos, m, u);
        Some(m)
    }

    pub fn uci_list(&self) -> UciList<'_> {
        UciList(self)
    }

    /// Returns a cursor to go through the positions of the game
    pub fn walk(&self) -> Walker<'_> {
        Walker {
            pos: self.pos,
            stack: &self.stack,
            idx: 0,
            pos_idx: self.stack.len(),
        }
    }
}

impl PartialEq<Self> for MoveChain {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
            && self.stack.len() == other.stack.len()
            && self
                .stack
                .iter()
                .zip(other.stack.iter())
                .all(|((m1, _), (m2, _))| m1 == m2)
    }
}

impl Eq for MoveChain {}

/// Wrapper to format the moves of [`MoveChain`] as space-separated UCI list
pub struct UciList<'a>(&'a MoveChain);

impl<'a> fmt::Display for UciList<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        for (i, m) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", m)?;
        }
        Ok(())
    }
}

/// Cursor over the moves of [`MoveChain`] together with the positions preceding them
pub struct Walker<'a> {
    pos: Position,
    stack: &'a [(Move, RawUndo)],
    idx: usize,
    pos_idx: usize,
}

impl<'a> Walker<'a> {
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub fn idx(&self) -> usize {
        self.idx
    }

    fn set_pos_idx(&mut self, target: usize) {
        while self.pos_idx > target {
            self.pos_idx -= 1;
            let (mv, u) = self.stack[self.pos_idx];
            moves::unmake_raw(&mut self.pos, mv, u);
        }
        while self.pos_idx < target {
            let (mv, _) = self.stack[self.pos_idx];
            let _ = self.pos.apply(mv);
            self.pos.flip_side();
            self.pos_idx += 1;
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<(&Position, Move)> {
        if self.idx == self.stack.len() {
            return None;
        }
        self.idx += 1;
        self.set_pos_idx(self.idx - 1);
        Some((&self.pos, self.stack[self.idx - 1].0))
    }

    pub fn prev(&mut self) -> Option<(&Position, Move)> {
        if self.idx == 0 {
            return None;
        }
        self.idx -= 1;
        self.set_pos_idx(self.idx);
        Some((&self.pos, self.stack[self.idx].0))
    }

    pub fn start(&mut self) {
        self.idx = 0;
    }

    pub fn end(&mut self) {
        self.idx = self.stack.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;

    #[test]
    fn test_push_pop() {
        let mut chain = MoveChain::new_initial();
        chain.push_uci("e2e4").unwrap();
        chain.push(Move::from_uci("e7e5").unwrap()).unwrap();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.last().side(), Color::White);
        assert_eq!(chain.last_move(), Some(Move::from_uci("e7e5").unwrap()));
        assert_eq!(chain.status(), Ok(Status::Ongoing));

        let saved = chain.clone();
        assert!(chain.push_uci("e4e5").is_err());
        assert!(chain.push(Move::from_uci("d1d8").unwrap()).is_err());
        assert_eq!(chain, saved);

        assert_eq!(chain.pop(), Some(Move::from_uci("e7e5").unwrap()));
        assert_eq!(chain.pop(), Some(Move::from_uci("e2e4").unwrap()));
        assert_eq!(chain.pop(), None);
        assert_eq!(chain, MoveChain::new_initial());
    }

    #[test]
    fn test_uci_list() {
        let chain = MoveChain::from_uci_list(Position::initial(), "g1f3 g8f6 b1c3").unwrap();
        assert_eq!(chain.uci_list().to_string(), "g1f3 g8f6 b1c3");
        assert_eq!(chain.first(), Position::initial());
        assert_eq!(chain.get(1), Some(Move::from_uci("g8f6").unwrap()));
        assert_eq!(chain.get(3), None);

        let err = MoveChain::from_uci_list(Position::initial(), "g1f3 g8f6 g1f3").unwrap_err();
        assert_eq!(err.pos, 2);
        assert_eq!(
            err.to_string(),
            "cannot parse UCI move #3: invalid move: move is not semi-legal"
        );
    }

    #[test]
    fn test_fools_mate() {
        let mut chain = MoveChain::new_initial();
        chain.push_uci_list("f2f3 e7e5 g2g4").unwrap();
        assert_eq!(chain.is_finished(), Ok(false));
        chain.push_uci("d8h4").unwrap();
        assert_eq!(chain.status(), Ok(Status::Checkmate));
        assert_eq!(chain.is_finished(), Ok(true));
        assert_eq!(
            chain.calc_outcome(),
            Ok(Some(Outcome::Checkmate {
                winner: Color::Black
            }))
        );
        assert!(chain.push_uci("a2a3").is_err());
    }

    #[test]
    fn test_walk() {
        let chain = MoveChain::from_uci_list(Position::initial(), "e2e4 e7e5 g1f3").unwrap();
        let mut walker = chain.walk();
        assert_eq!(walker.len(), 3);

        let (pos, mv) = walker.next().unwrap();
        assert_eq!(*pos, Position::initial());
        assert_eq!(mv.to_string(), "e2e4");

        let (pos, mv) = walker.next().unwrap();
        assert_eq!(
            pos.as_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b"
        );
        assert_eq!(mv.to_string(), "e7e5");

        let (_, mv) = walker.next().unwrap();
        assert_eq!(mv.to_string(), "g1f3");
        assert!(walker.next().is_none());

        let (pos, mv) = walker.prev().unwrap();
        assert_eq!(pos.side(), Color::White);
        assert_eq!(mv.to_string(), "g1f3");

        walker.start();
        let (pos, _) = walker.next().unwrap();
        assert_eq!(*pos, Position::initial());
    }

    #[test]
    fn test_random_playout() {
        use crate::movegen::{self, Filter};
        use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10 {
            let mut chain = MoveChain::new_initial();
            for _ in 0..150 {
                let pos = *chain.last();
                let legal = pos.legal_moves().unwrap();
                let pseudo = movegen::gen_moves(&pos, Filter::PseudoLegal).unwrap();
                for &mv in &pseudo {
                    let after = pos.applied(mv);
                    let king = after.board().king_pos(pos.side()).unwrap();
                    let exposed =
                        movegen::is_cell_attacked(after.board(), king, pos.side().inv());
                    assert_eq!(legal.contains(&mv), !exposed, "move {} in {}", mv, pos);
                }
                let Some(&mv) = legal.choose(&mut rng) else {
                    assert!(pos.is_terminal().unwrap());
                    break;
                };
                chain.push(mv).unwrap();
                assert_eq!(chain.last().validate(), Ok(()));
            }
            assert_eq!(chain.first(), Position::initial());
            while chain.pop().is_some() {}
            assert_eq!(*chain.last(), Position::initial());
        }
    }
}
