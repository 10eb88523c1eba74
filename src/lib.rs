// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A chess rules core: board positions, fully legal move generation, immutable state
//! transitions, game status classification and a shallow alpha-beta opponent.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod attacks;
mod errors;
pub mod eval;
mod move_generator;
mod moves;
pub mod notation;
mod perft;
mod position;
pub mod search;
mod status;
pub mod transport;
mod types;

pub use errors::{InvalidSource, MoveError};
pub use move_generator::{MoveGenerator, MoveVec};
pub use moves::{Move, MoveKind, MoveRequest, MAX_MOVES};
pub use perft::{divide, perft, perft_parallel};
pub use position::{FenParseError, Position, Transition};
pub use search::select_move;
pub use status::{status, DrawReason, GameStatus, FIFTY_MOVE_LIMIT};
pub use transport::{replay, MoveRecord, Replay, ReplayHalt};
pub use types::{CastleStatus, Color, Direction, Piece, PieceKind, Square};
pub use types::{COLORS, PIECE_KINDS, PROMOTION_KINDS, SQUARES};
