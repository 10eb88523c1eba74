// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::ops::{Add, Sub};

/// Score is the output of a board evaluation function, in centipawns. Scores are always relative
/// to White: positive scores favor White and negative scores favor Black, no matter whose turn
/// it is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Score(i32);

impl Score {
    /// A bound below every score an evaluator can produce.
    pub const NEG_INFINITY: Score = Score(i32::min_value() + 1);

    /// A bound above every score an evaluator can produce.
    pub const INFINITY: Score = Score(i32::max_value());

    pub fn new(centipawns: i32) -> Score {
        Score(centipawns)
    }

    pub fn centipawns(self) -> i32 {
        self.0
    }
}

impl Add<i32> for Score {
    type Output = Score;

    fn add(self, rhs: i32) -> Score {
        Score(self.0.saturating_add(rhs))
    }
}

impl Sub<i32> for Score {
    type Output = Score;

    fn sub(self, rhs: i32) -> Score {
        Score(self.0.saturating_sub(rhs))
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Score::NEG_INFINITY => write!(f, "-inf"),
            Score::INFINITY => write!(f, "+inf"),
            Score(cp) => write!(f, "{}", cp),
        }
    }
}
