//! Utilities to work with moves in UCI format
//!
//! Moves are written as the source square followed by the destination square, for example
//! `e2e4`. Promotion suffixes are never emitted nor accepted, as pawns are always promoted to
//! queens.

use super::base::{Move, ValidateError};
use crate::types::{Coord, CoordError};

use std::str::FromStr;

use thiserror::Error;

/// Error parsing a UCI string into a [`Move`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum RawParseError {
    /// Bad string length
    #[error("bad string length")]
    BadLength,
    /// Bad source square
    #[error("bad source: {0}")]
    BadSrc(CoordError),
    /// Bad destination square
    #[error("bad destination: {0}")]
    BadDst(CoordError),
}

/// Error parsing UCI into a semilegal or legal [`Move`]
#[derive(Debug, Clone, Error, Eq, PartialEq)]
pub enum ParseError {
    /// Error parsing move
    #[error("cannot parse move: {0}")]
    Parse(#[from] RawParseError),
    /// Move is not semilegal or legal
    #[error("invalid move: {0}")]
    Validate(#[from] ValidateError),
}

impl FromStr for Move {
    type Err = RawParseError;

    fn from_str(s: &str) -> Result<Move, Self::Err> {
        if s.len() != 4 {
            return Err(RawParseError::BadLength);
        }
        let src = s.get(0..2).ok_or(RawParseError::BadLength)?;
        let dst = s.get(2..4).ok_or(RawParseError::BadLength)?;
        Ok(Move::new(
            Coord::from_str(src).map_err(RawParseError::BadSrc)?,
            Coord::from_str(dst).map_err(RawParseError::BadDst)?,
        ))
    }
}
