// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::eval::{BoardEvaluator, Score};
use crate::move_generator::{MoveGenerator, MoveVec};
use crate::moves::Move;
use crate::position::{Position, Transition};
use crate::types::Color;

/// Penalty subtracted from the material score of a node where the side to move has no legal
/// moves. Checkmate and stalemate are not told apart.
pub const NO_MOVES_PENALTY: i32 = 5000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    /// The chosen move, or `None` if the root has no move the search can play.
    pub best_move: Option<Move>,
    pub nodes_searched: u64,
    pub score: Score,
}

pub trait Searcher {
    fn search(&mut self, pos: &Position, depth: u32) -> SearchResult;
}

/// Fixed-depth minimax with alpha-beta pruning. White is always the maximizing player and Black
/// the minimizing one; scores come from the evaluator, which is White-relative.
///
/// Moves are tried in generation order and a move only replaces the current best if it is
/// strictly better, so ties go to the move generated first. Unresolved promotions are skipped.
pub struct AlphaBetaSearcher<E> {
    evaluator: E,
    nodes_searched: u64,
}

impl<E: BoardEvaluator> AlphaBetaSearcher<E> {
    pub fn new() -> AlphaBetaSearcher<E> {
        AlphaBetaSearcher {
            evaluator: Default::default(),
            nodes_searched: 0u64,
        }
    }

    fn alpha_beta(
        &mut self,
        pos: &Position,
        mut alpha: Score,
        mut beta: Score,
        depth: u32,
    ) -> (Score, Option<Move>) {
        self.nodes_searched += 1;
        if depth == 0 {
            return (self.evaluator.evaluate(pos), None);
        }

        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves(pos, &mut moves);
        if moves.is_empty() {
            return (self.evaluator.evaluate(pos) - NO_MOVES_PENALTY, None);
        }

        let maximizing = pos.side_to_move() == Color::White;
        let mut best_score = if maximizing {
            Score::NEG_INFINITY
        } else {
            Score::INFINITY
        };
        let mut best_move = None;
        for mov in moves {
            let child = match pos.make_move(mov) {
                Ok(Transition::Applied(child)) => child,
                Ok(Transition::PromotionRequired) | Err(_) => continue,
            };

            let (score, _) = self.alpha_beta(&child, alpha, beta, depth - 1);
            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some(mov);
                }

                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some(mov);
                }

                beta = beta.min(best_score);
            }

            if beta <= alpha {
                break;
            }
        }

        (best_score, best_move)
    }
}

impl<E: BoardEvaluator> Default for AlphaBetaSearcher<E> {
    fn default() -> AlphaBetaSearcher<E> {
        AlphaBetaSearcher::new()
    }
}

impl<E: BoardEvaluator> Searcher for AlphaBetaSearcher<E> {
    fn search(&mut self, pos: &Position, depth: u32) -> SearchResult {
        self.nodes_searched = 0;
        let (score, best_move) =
            self.alpha_beta(pos, Score::NEG_INFINITY, Score::INFINITY, depth);
        match best_move {
            Some(mov) => debug!(
                "depth {}: best move {} (score {}, {} nodes)",
                depth, mov, score, self.nodes_searched
            ),
            None => debug!(
                "depth {}: no playable move ({} nodes)",
                depth, self.nodes_searched
            ),
        }

        SearchResult {
            best_move,
            nodes_searched: self.nodes_searched,
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AlphaBetaSearcher, Searcher, NO_MOVES_PENALTY};
    use crate::eval::{MaterialEvaluator, Score};
    use crate::moves::Move;
    use crate::position::Position;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn search(fen: &str, depth: u32) -> super::SearchResult {
        let pos = Position::from_fen(fen).unwrap();
        AlphaBetaSearcher::<MaterialEvaluator>::new().search(&pos, depth)
    }

    #[test]
    fn depth_zero_is_static_eval() {
        let result = search("4k3/8/8/8/8/8/8/3QK3 w - - 0 1", 0);
        assert_eq!(None, result.best_move);
        assert_eq!(Score::new(900), result.score);
        assert_eq!(1, result.nodes_searched);
    }

    #[test]
    fn white_takes_hanging_queen() {
        let result = search("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 1);
        assert_eq!(
            Some(Move::capture(
                Square::D1,
                Square::D5,
                Piece::new(PieceKind::Queen, Color::Black)
            )),
            result.best_move
        );
    }

    #[test]
    fn black_takes_hanging_rook() {
        let result = search("3rk3/8/8/8/8/8/8/3RK3 b - - 0 1", 1);
        assert_eq!(
            Some(Move::capture(
                Square::D8,
                Square::D1,
                Piece::new(PieceKind::Rook, Color::White)
            )),
            result.best_move
        );
    }

    #[test]
    fn no_moves_applies_penalty() {
        // black is stalemated.
        let result = search("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1", 2);
        assert_eq!(None, result.best_move);
        assert_eq!(Score::new(900 - NO_MOVES_PENALTY), result.score);
    }

    #[test]
    fn unresolved_promotions_are_skipped() {
        // the only white moves besides the king's are promotions.
        let result = search("k7/4P3/8/8/8/8/8/K7 w - - 0 1", 1);
        let best = result.best_move.unwrap();
        assert!(!best.is_promotion());
        assert_eq!(Square::A1, best.source());
    }

    #[test]
    fn ties_go_to_first_generated_move() {
        // every move from the start position keeps material level at depth 1. The first
        // generated move is the b8 knight's jump to a6.
        let pos = Position::from_start_position();
        let pos = pos
            .make_move(Move::quiet(Square::E2, Square::E3))
            .unwrap()
            .into_position()
            .unwrap();
        let result = AlphaBetaSearcher::<MaterialEvaluator>::new().search(&pos, 1);
        assert_eq!(Some(Move::quiet(Square::B8, Square::A6)), result.best_move);
    }
}
