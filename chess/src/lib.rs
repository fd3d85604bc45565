//! # NeuroBoard chess rules
//!
//! A small chess rules engine. Given a position and the side to move, it enumerates pseudo-legal
//! moves per piece, filters them to legal moves by rejecting the ones that leave the moving side's
//! king attacked, detects check, checkmate and stalemate, and scores a position with material and
//! piece-square tables.
//!
//! Castling, en passant, draws by repetition or by the 50-move rule are not part of these rules.
//! Pawns reaching the last rank always become queens.
//!
//! Adversarial search is not implemented here. Instead, [`game::Game`] describes the interface a
//! search procedure needs, and [`game::Rules`] implements it.
//!
//! # Example
//!
//! ```
//! use neuroboard::{Position, Move, Status};
//!
//! let pos = Position::initial();
//! assert_eq!(pos.legal_moves().unwrap().len(), 20);
//!
//! let mv = Move::from_uci_legal("e2e4", &pos).unwrap();
//! let pos = pos.make_move(mv).unwrap();
//! assert_eq!(pos.as_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b");
//! assert_eq!(pos.status().unwrap(), Status::Ongoing);
//! ```

pub mod board;
pub mod chain;
pub mod eval;
pub mod game;
pub mod legal;
pub mod movegen;
pub mod moves;

mod generic;

pub use neuroboard_base::{geometry, squares, types};

pub use squares::SquareSet;
pub use board::{Board, Position};
pub use chain::MoveChain;
pub use movegen::{Filter, MoveList};
pub use moves::{Make, Move};
pub use types::{Cell, Color, Coord, File, Outcome, Piece, Rank, Status};
