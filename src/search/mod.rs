// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The automated opponent: a shallow, deterministic alpha-beta search over material.
use crate::eval::MaterialEvaluator;
use crate::moves::Move;
use crate::position::Position;

mod searcher;

pub use searcher::{AlphaBetaSearcher, SearchResult, Searcher, NO_MOVES_PENALTY};

pub const MIN_SEARCH_DEPTH: u32 = 1;
pub const MAX_SEARCH_DEPTH: u32 = 3;
pub const DEFAULT_SEARCH_DEPTH: u32 = 2;

/// Clamps a requested depth into `MIN_SEARCH_DEPTH..=MAX_SEARCH_DEPTH`. A depth of zero means
/// "unspecified" and selects `DEFAULT_SEARCH_DEPTH`.
pub fn clamp_depth(depth: u32) -> u32 {
    if depth == 0 {
        return DEFAULT_SEARCH_DEPTH;
    }

    depth.max(MIN_SEARCH_DEPTH).min(MAX_SEARCH_DEPTH)
}

/// Picks a move for the side to move in `pos`, searching to the clamped `depth`. Returns `None`
/// when the side to move has no move the search will play.
///
/// A missing position is replaced by the standard starting position.
pub fn select_move(pos: Option<&Position>, depth: u32) -> Option<Move> {
    let depth = clamp_depth(depth);
    let mut searcher = AlphaBetaSearcher::<MaterialEvaluator>::new();
    match pos {
        Some(pos) => searcher.search(pos, depth).best_move,
        None => {
            warn!("no position supplied to search, using the starting position");
            searcher
                .search(&Position::from_start_position(), depth)
                .best_move
        }
    }
}
