// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors surfaced when a move cannot be applied to a position.
use std::error::Error;
use std::fmt;

/// Why the origin square of a move was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InvalidSource {
    /// There is no piece on the origin square.
    NoPiece,
    /// The piece on the origin square does not belong to the side to move.
    WrongSide,
}

/// Possible errors that can arise when applying a move to a `Position`.
///
/// None of these are retried internally. A pawn reaching the last rank without a promotion
/// piece is not an error; see `Transition::PromotionRequired`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    InvalidSource(InvalidSource),
    /// The move is not among the legal moves from its origin square, or its promotion piece
    /// does not fit the move.
    IllegalMove,
    /// A transport string did not parse. Carries the offending input.
    MalformedTransport(String),
}

impl From<InvalidSource> for MoveError {
    fn from(reason: InvalidSource) -> MoveError {
        MoveError::InvalidSource(reason)
    }
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidSource(InvalidSource::NoPiece) => {
                write!(f, "no piece on from-square")
            }
            MoveError::InvalidSource(InvalidSource::WrongSide) => write!(f, "not your turn"),
            MoveError::IllegalMove => write!(f, "move not legal"),
            MoveError::MalformedTransport(input) => write!(f, "malformed transport '{}'", input),
        }
    }
}

impl Error for MoveError {}
