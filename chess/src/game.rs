//! Interface for adversarial search
//!
//! Search itself is not implemented in this crate. A minimax or alpha-beta driver needs only the
//! operations of [`Game`], and [`Rules`] provides them for chess positions.

use crate::board::Position;
use crate::eval;
use crate::movegen::{self, MoveList};
use crate::moves::{Make, Move, Unchecked};
use crate::types::Color;

/// Two-player zero-sum game, as seen by a search procedure
pub trait Game {
    type State;
    type Action;
    type Player;
    type Error;

    /// Returns the actions available to the player to move
    fn actions(&self, state: &Self::State) -> Result<Vec<Self::Action>, Self::Error>;

    /// Returns the state after `action` is taken, leaving `state` untouched
    fn result(&self, state: &Self::State, action: Self::Action) -> Self::State;

    /// Returns `true` if the game is over in `state`
    fn terminal_test(&self, state: &Self::State) -> Result<bool, Self::Error>;

    /// Returns the score of `state` from the point of view of `player`
    fn utility(&self, state: &Self::State, player: Self::Player) -> i32;

    /// Returns the player to move in `state`
    fn to_move(&self, state: &Self::State) -> Self::Player;
}

/// Chess rules implementing [`Game`]
///
/// Actions are legal moves. The utility is the static evaluation from [`eval::evaluate()`], which
/// is negated for Black.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Rules;

impl Rules {
    /// Same as [`Game::actions()`], but without allocation
    pub fn legal_moves(&self, state: &Position) -> Result<MoveList, movegen::Error> {
        state.legal_moves()
    }
}

impl Game for Rules {
    type State = Position;
    type Action = Move;
    type Player = Color;
    type Error = movegen::Error;

    fn actions(&self, state: &Position) -> Result<Vec<Move>, movegen::Error> {
        Ok(self.legal_moves(state)?.to_vec())
    }

    /// Applies the move without validation, as it's expected to come from [`Game::actions()`]
    fn result(&self, state: &Position, action: Move) -> Position {
        match Unchecked(action).make(state) {
            Ok(res) => res,
            Err(e) => match e {},
        }
    }

    fn terminal_test(&self, state: &Position) -> Result<bool, movegen::Error> {
        state.is_terminal()
    }

    fn utility(&self, state: &Position, player: Color) -> i32 {
        let score = eval::evaluate(state.board());
        match player {
            Color::White => score,
            Color::Black => -score,
        }
    }

    fn to_move(&self, state: &Position) -> Color {
        state.side()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    fn minimax<G: Game>(
        game: &G,
        state: &G::State,
        depth: usize,
        player: G::Player,
    ) -> Result<(i32, Option<G::Action>), G::Error>
    where
        G::Action: Copy,
        G::Player: Copy + PartialEq,
    {
        if depth == 0 || game.terminal_test(state)? {
            return Ok((game.utility(state, player), None));
        }
        let maximize = game.to_move(state) == player;
        let mut best: Option<(i32, G::Action)> = None;
        for action in game.actions(state)? {
            let (score, _) = minimax(game, &game.result(state, action), depth - 1, player)?;
            let better = match best {
                None => true,
                Some((best_score, _)) if maximize => score > best_score,
                Some((best_score, _)) => score < best_score,
            };
            if better {
                best = Some((score, action));
            }
        }
        Ok(match best {
            Some((score, action)) => (score, Some(action)),
            None => (game.utility(state, player), None),
        })
    }

    #[test]
    fn test_contract() {
        let rules = Rules;
        let pos = Position::initial();
        assert_eq!(rules.actions(&pos).unwrap().len(), 20);
        assert_eq!(rules.to_move(&pos), Color::White);
        assert_eq!(rules.terminal_test(&pos), Ok(false));
        assert_eq!(rules.utility(&pos, Color::White), 0);

        let next = rules.result(&pos, Move::from_uci("e2e4").unwrap());
        assert_eq!(pos, Position::initial());
        assert_eq!(rules.to_move(&next), Color::Black);
        assert_eq!(
            rules.utility(&next, Color::White),
            -rules.utility(&next, Color::Black)
        );
        assert_eq!(rules.utility(&next, Color::White), 25 - 50);
    }

    #[test]
    fn test_terminal() {
        let rules = Rules;
        let pos =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w").unwrap();
        assert_eq!(rules.terminal_test(&pos), Ok(true));
        assert!(rules.actions(&pos).unwrap().is_empty());
    }

    #[test]
    fn test_search() {
        let rules = Rules;
        // The black queen is hanging
        let pos = Position::from_fen("4k3/8/8/3q4/8/8/3Q4/4K3 w").unwrap();
        let (score, best) = minimax(&rules, &pos, 2, Color::White).unwrap();
        let best = best.unwrap();
        assert_eq!(best.to_string(), "d2d5");
        assert!(score > 500);
        let after = rules.result(&pos, best);
        assert_eq!(after.status(), Ok(Status::Ongoing));
        assert_eq!(after.board().color(Color::Black).len(), 1);
    }
}
