// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate criterion;

use chess_core::attacks;
use chess_core::eval::MaterialEvaluator;
use chess_core::search::{AlphaBetaSearcher, Searcher};
use chess_core::{Color, MoveGenerator, MoveVec, Position, Square};
use criterion::black_box;
use criterion::Criterion;

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("is attacked e4 kiwipete", |b| {
        let pos = Position::from_fen(KIWIPETE).unwrap();
        b.iter(|| attacks::is_attacked(black_box(&pos), Square::E4, Color::Black))
    });

    c.bench_function("position clone", |b| {
        let pos = Position::from_start_position();
        b.iter(|| black_box(&pos).clone())
    });

    c.bench_function("generate moves start", |b| {
        let pos = Position::from_start_position();
        b.iter(|| {
            let mut vec = MoveVec::default();
            let gen = MoveGenerator::new();
            gen.generate_moves(black_box(&pos), &mut vec);
        });
    });

    c.bench_function("generate moves kiwipete", |b| {
        let pos = Position::from_fen(KIWIPETE).unwrap();
        b.iter(|| {
            let mut vec = MoveVec::default();
            MoveGenerator::new().generate_moves(black_box(&pos), &mut vec);
        });
    });

    c.bench_function("status kiwipete", |b| {
        let pos = Position::from_fen(KIWIPETE).unwrap();
        b.iter(|| black_box(&pos).status())
    });

    c.bench_function("search depth 2 start", |b| {
        let pos = Position::from_start_position();
        b.iter(|| {
            let mut searcher = AlphaBetaSearcher::<MaterialEvaluator>::new();
            searcher.search(black_box(&pos), 2)
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
