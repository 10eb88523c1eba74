// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The `moves` module contains the definition of Moves and of move requests.
//!
//! A `Move` is produced by the move generator and carries everything the state transition
//! needs to replay it: what was captured and where, where the castling rook goes, whether the
//! move opens an en-passant opportunity. Each kind of move is its own `MoveKind` variant, so a
//! castle can never also be an en-passant capture.
//!
//! A `MoveRequest` is what a caller submits: just the origin, the destination and (for pawns
//! reaching the last rank) the promotion piece. Requests are matched against generated moves
//! before anything is applied.
use std::fmt::{self, Write};

use arrayvec::ArrayVec;

use crate::types::{Piece, PieceKind, Square};

/// The maximum number of moves the generator will ever produce for a single position.
pub const MAX_MOVES: usize = 256;

pub type MoveVec = ArrayVec<Move, MAX_MOVES>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// A non-capturing move that needs no special handling.
    Quiet,
    /// A pawn advancing two squares from its starting row.
    DoublePawnPush,
    /// A capture of the given piece on the destination square.
    Capture(Piece),
    /// A pawn capturing en passant. The captured pawn sits on `captured_square`, not on the
    /// destination.
    EnPassant {
        captured_square: Square,
        captured: Piece,
    },
    /// A castle, encoded with the king's origin and destination. The rook moves from
    /// `rook_from` to `rook_to`.
    Castle { rook_from: Square, rook_to: Square },
    /// A pawn reaching the last row. `promote_to` stays `None` until the caller picks a piece.
    Promotion {
        promote_to: Option<PieceKind>,
        captured: Option<Piece>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    source: Square,
    destination: Square,
    kind: MoveKind,
}

impl Move {
    /// Constructs a new quiet move from the source square to the destination square.
    pub fn quiet(source: Square, dest: Square) -> Move {
        Move {
            source,
            destination: dest,
            kind: MoveKind::Quiet,
        }
    }

    /// Constructs a new capture of `captured`, which sits on the destination square.
    pub fn capture(source: Square, dest: Square, captured: Piece) -> Move {
        Move {
            source,
            destination: dest,
            kind: MoveKind::Capture(captured),
        }
    }

    pub fn double_pawn_push(source: Square, dest: Square) -> Move {
        Move {
            source,
            destination: dest,
            kind: MoveKind::DoublePawnPush,
        }
    }

    pub fn en_passant(
        source: Square,
        dest: Square,
        captured_square: Square,
        captured: Piece,
    ) -> Move {
        Move {
            source,
            destination: dest,
            kind: MoveKind::EnPassant {
                captured_square,
                captured,
            },
        }
    }

    /// Constructs a castle. `source` and `dest` are the king's squares.
    pub fn castle(source: Square, dest: Square, rook_from: Square, rook_to: Square) -> Move {
        Move {
            source,
            destination: dest,
            kind: MoveKind::Castle { rook_from, rook_to },
        }
    }

    /// Constructs a promotion whose piece has not been chosen yet.
    pub fn promotion(source: Square, dest: Square, captured: Option<Piece>) -> Move {
        Move {
            source,
            destination: dest,
            kind: MoveKind::Promotion {
                promote_to: None,
                captured,
            },
        }
    }

    /// Returns this move with the promotion piece set. Moves that are not promotions are
    /// returned unchanged.
    pub fn with_promotion(self, kind: PieceKind) -> Move {
        match self.kind {
            MoveKind::Promotion { captured, .. } => Move {
                kind: MoveKind::Promotion {
                    promote_to: Some(kind),
                    captured,
                },
                ..self
            },
            _ => self,
        }
    }

    pub fn source(self) -> Square {
        self.source
    }

    pub fn destination(self) -> Square {
        self.destination
    }

    pub fn kind(self) -> MoveKind {
        self.kind
    }

    pub fn is_quiet(self) -> bool {
        self.kind == MoveKind::Quiet
    }

    pub fn is_capture(self) -> bool {
        self.captured_piece().is_some()
    }

    pub fn is_en_passant(self) -> bool {
        match self.kind {
            MoveKind::EnPassant { .. } => true,
            _ => false,
        }
    }

    pub fn is_double_pawn_push(self) -> bool {
        self.kind == MoveKind::DoublePawnPush
    }

    pub fn is_castle(self) -> bool {
        self.castle_rook().is_some()
    }

    pub fn is_promotion(self) -> bool {
        match self.kind {
            MoveKind::Promotion { .. } => true,
            _ => false,
        }
    }

    /// The piece a promotion turns into, if one has been chosen.
    pub fn promotion_piece(self) -> Option<PieceKind> {
        match self.kind {
            MoveKind::Promotion { promote_to, .. } => promote_to,
            _ => None,
        }
    }

    pub fn captured_piece(self) -> Option<Piece> {
        match self.kind {
            MoveKind::Capture(piece) => Some(piece),
            MoveKind::EnPassant { captured, .. } => Some(captured),
            MoveKind::Promotion { captured, .. } => captured,
            _ => None,
        }
    }

    /// The square the captured piece is removed from.
    pub fn capture_square(self) -> Option<Square> {
        match self.kind {
            MoveKind::EnPassant {
                captured_square, ..
            } => Some(captured_square),
            _ if self.is_capture() => Some(self.destination),
            _ => None,
        }
    }

    /// The rook's origin and destination, for castles.
    pub fn castle_rook(self) -> Option<(Square, Square)> {
        match self.kind {
            MoveKind::Castle { rook_from, rook_to } => Some((rook_from, rook_to)),
            _ => None,
        }
    }

    /// Returns an UCI-compatible string representation of this move.
    pub fn as_uci(self) -> String {
        let mut buf = String::new();
        write!(&mut buf, "{}{}", self.source, self.destination).unwrap();
        if let Some(kind) = self.promotion_piece() {
            buf.push(kind.as_char());
        }

        buf
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_uci())
    }
}

/// A move as submitted by a caller: an origin, a destination and an optional promotion piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoveRequest {
    pub source: Square,
    pub destination: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub fn new(source: Square, destination: Square) -> MoveRequest {
        MoveRequest {
            source,
            destination,
            promotion: None,
        }
    }

    pub fn promote_to(self, kind: PieceKind) -> MoveRequest {
        MoveRequest {
            promotion: Some(kind),
            ..self
        }
    }
}

impl From<Move> for MoveRequest {
    fn from(mov: Move) -> MoveRequest {
        MoveRequest {
            source: mov.source(),
            destination: mov.destination(),
            promotion: mov.promotion_piece(),
        }
    }
}

impl From<&Move> for MoveRequest {
    fn from(mov: &Move) -> MoveRequest {
        MoveRequest::from(*mov)
    }
}
