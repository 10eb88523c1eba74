// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Move generation. `pseudo_moves` follows piece movement rules only; `legal_moves` and
//! `generate_moves` additionally drop moves that leave the mover's king attacked.
//!
//! Generation order is part of the contract: squares are visited row-major from a8, and each
//! piece emits its moves in a fixed per-kind order. The search engine breaks ties by this
//! order, which keeps its choices reproducible.
use crate::attacks::{KING_OFFSETS, KNIGHT_OFFSETS};
use crate::moves::Move;
use crate::position::{kingside_rook, queenside_rook, Position};
use crate::types::{Color, Direction, Piece, PieceKind, Square};
use crate::types::{ALL_DIRECTIONS, DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS, SQUARES};

pub use crate::moves::MoveVec;

#[derive(Copy, Clone, Debug, Default)]
pub struct MoveGenerator;

impl MoveGenerator {
    pub fn new() -> MoveGenerator {
        MoveGenerator
    }

    /// Generates every legal move for the side to move, square by square in row-major order.
    pub fn generate_moves(&self, pos: &Position, moves: &mut MoveVec) {
        for &sq in SQUARES.iter() {
            self.legal_moves(pos, sq, moves);
        }
    }

    /// Generates the legal moves of the piece on `from`.
    pub fn legal_moves(&self, pos: &Position, from: Square, moves: &mut MoveVec) {
        let mut pseudo = MoveVec::new();
        self.pseudo_moves(pos, from, &mut pseudo);
        moves.extend(
            pseudo
                .into_iter()
                .filter(|&m| pos.is_legal_given_pseudolegal(m)),
        );
    }

    /// Generates the pseudolegal moves of the piece on `from`, ignoring whether they leave the
    /// mover's own king in check. Nothing is generated for an empty square or for a piece that
    /// does not belong to the side to move.
    pub fn pseudo_moves(&self, pos: &Position, from: Square, moves: &mut MoveVec) {
        let piece = match pos.piece_at(from) {
            Some(piece) if piece.color == pos.side_to_move() => piece,
            _ => return,
        };

        match piece.kind {
            PieceKind::Pawn => add_pawn_moves(pos, from, piece.color, moves),
            PieceKind::Knight => add_leaper_moves(pos, from, piece.color, &KNIGHT_OFFSETS, moves),
            PieceKind::Bishop => {
                add_slider_moves(pos, from, piece.color, &DIAGONAL_DIRECTIONS, moves)
            }
            PieceKind::Rook => {
                add_slider_moves(pos, from, piece.color, &ORTHOGONAL_DIRECTIONS, moves)
            }
            PieceKind::Queen => add_slider_moves(pos, from, piece.color, &ALL_DIRECTIONS, moves),
            PieceKind::King => {
                add_leaper_moves(pos, from, piece.color, &KING_OFFSETS, moves);
                add_castles(pos, from, piece.color, moves);
            }
        }
    }
}

fn add_pawn_moves(pos: &Position, from: Square, color: Color, moves: &mut MoveVec) {
    let dir = color.pawn_direction();
    let pawn_move = |to: Square, captured: Option<Piece>| {
        if to.row() == color.promotion_row() {
            Move::promotion(from, to, captured)
        } else if let Some(victim) = captured {
            Move::capture(from, to, victim)
        } else {
            Move::quiet(from, to)
        }
    };

    // non-capturing moves
    if let Some(single) = from.offset(dir, 0).filter(|&sq| pos.piece_at(sq).is_none()) {
        moves.push(pawn_move(single, None));

        // double-pawn pushes, for pawns still on their starting row
        if from.row() == color.pawn_row() {
            if let Some(double) = single.offset(dir, 0).filter(|&sq| pos.piece_at(sq).is_none()) {
                moves.push(Move::double_pawn_push(from, double));
            }
        }
    }

    // non-ep capturing moves
    for &dc in &[-1, 1] {
        if let Some(target) = from.offset(dir, dc) {
            if let Some(victim) = pos.piece_at(target).filter(|p| p.color != color) {
                moves.push(pawn_move(target, Some(victim)));
            }
        }
    }

    // en passant: the victim sits beside the capturing pawn, directly behind the target square.
    if let Some(ep_square) = pos.en_passant_square() {
        for &dc in &[-1, 1] {
            if from.offset(dir, dc) != Some(ep_square) {
                continue;
            }

            let victim_square = match from.offset(0, dc) {
                Some(sq) => sq,
                None => continue,
            };
            let victim = Piece::new(PieceKind::Pawn, color.toggle());
            if pos.piece_at(victim_square) == Some(victim) {
                moves.push(Move::en_passant(from, ep_square, victim_square, victim));
            }
        }
    }
}

fn add_leaper_moves(
    pos: &Position,
    from: Square,
    color: Color,
    offsets: &[(i32, i32)],
    moves: &mut MoveVec,
) {
    for &(dr, dc) in offsets {
        let to = match from.offset(dr, dc) {
            Some(sq) => sq,
            None => continue,
        };

        match pos.piece_at(to) {
            None => moves.push(Move::quiet(from, to)),
            Some(victim) if victim.color != color => moves.push(Move::capture(from, to, victim)),
            Some(_) => {}
        }
    }
}

fn add_slider_moves(
    pos: &Position,
    from: Square,
    color: Color,
    directions: &[Direction],
    moves: &mut MoveVec,
) {
    for &dir in directions {
        let mut cursor = from.towards(dir);
        while let Some(to) = cursor {
            match pos.piece_at(to) {
                None => moves.push(Move::quiet(from, to)),
                Some(victim) => {
                    if victim.color != color {
                        moves.push(Move::capture(from, to, victim));
                    }

                    break;
                }
            }

            cursor = to.towards(dir);
        }
    }
}

fn add_castles(pos: &Position, from: Square, color: Color, moves: &mut MoveVec) {
    let row = color.home_row();
    if from.row() != row || from.column() != 4 {
        return;
    }

    let enemy = color.toggle();
    let rook = Piece::new(PieceKind::Rook, color);
    let at = |column: usize| Square::from_coords(row, column);
    let empty = |columns: &[usize]| {
        columns
            .iter()
            .filter_map(|&c| at(c))
            .all(|sq| pos.piece_at(sq).is_none())
    };
    let safe = |columns: &[usize]| {
        columns
            .iter()
            .filter_map(|&c| at(c))
            .all(|sq| !pos.is_attacked(sq, enemy))
    };

    // A king in check may not castle out of it.
    if pos.is_attacked(from, enemy) {
        return;
    }

    // The king crosses f and lands on g; the rook lands on f.
    let kingside_corner = kingside_rook(color);
    if pos.can_castle_kingside(color)
        && pos.piece_at(kingside_corner) == Some(rook)
        && empty(&[5, 6])
        && safe(&[5, 6])
    {
        if let (Some(to), Some(rook_to)) = (at(6), at(5)) {
            moves.push(Move::castle(from, to, kingside_corner, rook_to));
        }
    }

    // The king crosses d and lands on c; b only needs to be empty. The rook lands on d.
    let queenside_corner = queenside_rook(color);
    if pos.can_castle_queenside(color)
        && pos.piece_at(queenside_corner) == Some(rook)
        && empty(&[1, 2, 3])
        && safe(&[3, 2])
    {
        if let (Some(to), Some(rook_to)) = (at(2), at(3)) {
            moves.push(Move::castle(from, to, queenside_corner, rook_to));
        }
    }
}
