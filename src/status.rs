// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Classification of a position into ongoing, checkmate, stalemate or drawn.
use std::fmt;

use crate::move_generator::{MoveGenerator, MoveVec};
use crate::position::Position;
use crate::types::Color;

/// The half-move clock value at which the fifty-move rule declares a draw.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DrawReason {
    FiftyMoveRule,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameStatus {
    /// The game continues. `in_check` is informational.
    Ongoing { in_check: bool },
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        match self {
            GameStatus::Ongoing { .. } => false,
            _ => true,
        }
    }

    /// A short human-readable summary of the status.
    pub fn note(self) -> &'static str {
        match self {
            GameStatus::Ongoing { in_check: true } => "check",
            GameStatus::Ongoing { in_check: false } => "ongoing",
            GameStatus::Checkmate {
                winner: Color::White,
            } => "checkmate, white wins",
            GameStatus::Checkmate {
                winner: Color::Black,
            } => "checkmate, black wins",
            GameStatus::Stalemate => "stalemate",
            GameStatus::Draw(DrawReason::FiftyMoveRule) => "draw by the fifty-move rule",
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.note())
    }
}

/// Classifies `pos` from the point of view of its side to move. Running out of legal moves takes
/// precedence over the fifty-move rule.
pub fn status(pos: &Position) -> GameStatus {
    let side = pos.side_to_move();
    let in_check = pos.is_check(side);

    let mut moves = MoveVec::new();
    MoveGenerator::new().generate_moves(pos, &mut moves);
    if moves.is_empty() {
        return if in_check {
            GameStatus::Checkmate {
                winner: side.toggle(),
            }
        } else {
            GameStatus::Stalemate
        };
    }

    if pos.halfmove_clock() >= FIFTY_MOVE_LIMIT {
        return GameStatus::Draw(DrawReason::FiftyMoveRule);
    }

    GameStatus::Ongoing { in_check }
}
