// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Perft ("performance test") walks the legal-move tree to a fixed depth and counts the leaves.
//! Published counts for well-known positions pin down move generation exactly.
use rayon::prelude::*;

use crate::move_generator::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::position::{Position, Transition};
use crate::types::PROMOTION_KINDS;

/// Counts the leaves of the legal-move tree of `pos` at `depth`. A promotion counts once for
/// each piece it can promote to. Runs on the calling thread.
pub fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    expanded_moves(pos)
        .into_iter()
        .map(|mov| perft_child(pos, mov, depth))
        .sum()
}

/// Same count as `perft`, with the root moves spread over the rayon thread pool. Each subtree
/// below the root is counted sequentially.
pub fn perft_parallel(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    expanded_moves(pos)
        .par_iter()
        .map(|&mov| perft_child(pos, mov, depth))
        .sum()
}

/// Per-move leaf counts at the root, for tracking down a miscount against a reference engine.
pub fn divide(pos: &Position, depth: u32) -> Vec<(Move, u64)> {
    expanded_moves(pos)
        .into_iter()
        .map(|mov| (mov, perft_child(pos, mov, depth)))
        .collect()
}

/// The legal moves of `pos`, with every promotion resolved to each piece it can promote to.
fn expanded_moves(pos: &Position) -> Vec<Move> {
    let mut moves = MoveVec::new();
    MoveGenerator::new().generate_moves(pos, &mut moves);
    let mut out = Vec::with_capacity(moves.len());
    for mov in moves {
        if mov.is_promotion() {
            out.extend(PROMOTION_KINDS.iter().map(|&kind| mov.with_promotion(kind)));
        } else {
            out.push(mov);
        }
    }

    out
}

fn perft_child(pos: &Position, mov: Move, depth: u32) -> u64 {
    match pos.make_move(mov) {
        Ok(Transition::Applied(child)) => perft(&child, depth.saturating_sub(1)),
        Ok(Transition::PromotionRequired) | Err(_) => {
            trace!("perft: generated move {} failed to apply", mov);
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{divide, perft, perft_parallel};
    use crate::position::Position;

    fn perft_test(fen: &'static str, depth: u32, count: u64) {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(count, perft(&pos, depth));
    }

    #[test]
    fn divide_sums_to_perft() {
        let pos = Position::from_start_position();
        let split = divide(&pos, 2);
        assert_eq!(20, split.len());
        assert_eq!(400u64, split.iter().map(|&(_, n)| n).sum::<u64>());
    }

    #[test]
    fn parallel_count_matches_sequential() {
        let pos = Position::from_fen(
            "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        )
        .unwrap();
        assert_eq!(264, perft_parallel(&pos, 2));
        assert_eq!(perft(&pos, 2), perft_parallel(&pos, 2));
        assert_eq!(1, perft_parallel(&pos, 0));
    }

    #[test]
    fn promotions_expand_to_four() {
        let pos = Position::from_fen("k7/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
        // four promotions plus three king moves.
        assert_eq!(7, perft(&pos, 1));
    }

    macro_rules! perft_tests {
        () => {};
        ($name:ident ($depth:expr): $fen:expr => $count:expr; $($tail:tt)*) => {
            #[test]
            fn $name() {
                perft_test($fen, $depth, $count)
            }

            perft_tests!($($tail)*);
        };

        (skip $name:ident ($depth:expr): $fen:expr => $count:expr; $($tail:tt)*) => {
            #[test]
            #[ignore]
            fn $name() {
                perft_test($fen, $depth, $count)
            }

            perft_tests!($($tail)*);
        };

    }

    perft_tests! {
        start_1 (1): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 20;
        start_2 (2): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 400;
        start_3 (3): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 8902;
        skip start_4 (4): "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1" => 197281;

        kiwipete_1 (1): "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1" => 48;
        kiwipete_2 (2): "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1" => 2039;
        skip kiwipete_3 (3): "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1" => 97862;

        position_3_1 (1): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1" => 14;
        position_3_2 (2): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1" => 191;
        position_3_3 (3): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1" => 2812;
        skip position_3_4 (4): "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1" => 43238;

        position_4_1 (1): "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1" => 6;
        position_4_2 (2): "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1" => 264;
        position_4_3 (3): "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1" => 9467;
        skip position_4_4 (4): "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1" => 422333;

        position_5_1 (1): "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8" => 44;
        position_5_2 (2): "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8" => 1486;
        skip position_5_3 (3): "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8" => 62379;
        skip position_5_4 (4): "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8" => 2103487;
    }
}
