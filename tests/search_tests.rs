// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use chess_core::eval::{MaterialEvaluator, Score};
use chess_core::search::{AlphaBetaSearcher, Searcher, MAX_SEARCH_DEPTH};
use chess_core::{select_move, Color, Move, MoveRequest, Piece, PieceKind, Position, Square};

fn play(pos: &Position, from: Square, to: Square) -> Position {
    pos.apply_move(MoveRequest::new(from, to))
        .unwrap()
        .into_position()
        .unwrap()
}

#[test]
fn black_finds_mate_in_one() {
    let mut pos = Position::from_start_position();
    pos = play(&pos, Square::F2, Square::F3);
    pos = play(&pos, Square::E7, Square::E5);
    pos = play(&pos, Square::G2, Square::G4);

    assert_eq!(
        Some(Move::quiet(Square::D8, Square::H4)),
        select_move(Some(&pos), 2)
    );
}

#[test]
fn captures_free_material() {
    let pos = Position::from_fen("4k3/8/8/8/3n4/8/8/3QK3 w - - 0 1").unwrap();
    assert_eq!(
        Some(Move::capture(
            Square::D1,
            Square::D4,
            Piece::new(PieceKind::Knight, Color::Black)
        )),
        select_move(Some(&pos), 2)
    );
}

#[test]
fn avoids_defended_piece_at_depth_two() {
    // the knight on d4 is defended by the pawn on e5; taking it loses the queen.
    let pos = Position::from_fen("4k3/8/8/4p3/3n4/8/8/3QK3 w - - 0 1").unwrap();
    let best = select_move(Some(&pos), 2).unwrap();
    assert_ne!(Square::D4, best.destination());
}

#[test]
fn same_arguments_same_move() {
    let pos =
        Position::from_fen("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4")
            .unwrap();
    for depth in 1..=MAX_SEARCH_DEPTH {
        assert_eq!(select_move(Some(&pos), depth), select_move(Some(&pos), depth));
    }
}

#[test]
fn depth_is_clamped() {
    let pos = Position::from_start_position();
    assert_eq!(select_move(Some(&pos), 3), select_move(Some(&pos), 50));
}

#[test]
fn no_move_in_checkmate() {
    let pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
    assert_eq!(None, select_move(Some(&pos), 2));
}

#[test]
fn never_proposes_unresolved_promotion() {
    let pos = Position::from_fen("k7/6P1/8/8/8/8/8/K7 w - - 0 1").unwrap();
    for depth in 1..=MAX_SEARCH_DEPTH {
        let best = select_move(Some(&pos), depth).unwrap();
        assert!(!best.is_promotion());
    }
}

#[test]
fn search_result_reports_nodes_and_score() {
    let pos = Position::from_start_position();
    let result = AlphaBetaSearcher::<MaterialEvaluator>::new().search(&pos, 2);
    assert!(result.best_move.is_some());
    assert!(result.nodes_searched > 20);
    assert_eq!(Score::new(0), result.score);
}
