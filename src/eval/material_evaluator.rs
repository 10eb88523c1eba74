// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::eval::{BoardEvaluator, Score};
use crate::position::Position;
use crate::types::{Color, PieceKind};

const KING_WEIGHT: i32 = 20000;
const QUEEN_WEIGHT: i32 = 900;
const ROOK_WEIGHT: i32 = 500;
const BISHOP_WEIGHT: i32 = 330;
const KNIGHT_WEIGHT: i32 = 320;
const PAWN_WEIGHT: i32 = 100;

/// The value of a single piece of the given kind, in centipawns. The king's value is a sentinel
/// that dwarfs all other material.
pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => PAWN_WEIGHT,
        PieceKind::Knight => KNIGHT_WEIGHT,
        PieceKind::Bishop => BISHOP_WEIGHT,
        PieceKind::Rook => ROOK_WEIGHT,
        PieceKind::Queen => QUEEN_WEIGHT,
        PieceKind::King => KING_WEIGHT,
    }
}

/// An evaluator that only counts material: White's pieces add their value, Black's subtract it.
#[derive(Copy, Clone, Debug, Default)]
pub struct MaterialEvaluator;

impl MaterialEvaluator {
    pub fn new() -> MaterialEvaluator {
        MaterialEvaluator
    }
}

impl BoardEvaluator for MaterialEvaluator {
    fn evaluate(&self, pos: &Position) -> Score {
        let total = pos
            .pieces()
            .map(|(_, piece)| match piece.color {
                Color::White => piece_value(piece.kind),
                Color::Black => -piece_value(piece.kind),
            })
            .sum();

        Score::new(total)
    }
}
