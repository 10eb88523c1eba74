// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt::Write;

use crate::moves::{Move, MoveKind};

/// Renders a move for move lists: `e2-e4`, `d5xe6`, `e7-e8=Q`, `e1-g1 (O-O)`, `e5xd6 e.p.`.
pub fn pretty(mov: &Move) -> String {
    let mut buf = String::new();
    let sep = if mov.is_capture() { 'x' } else { '-' };
    write!(&mut buf, "{}{}{}", mov.source(), sep, mov.destination()).unwrap();
    if let Some(kind) = mov.promotion_piece() {
        buf.push('=');
        buf.push(kind.as_char().to_ascii_uppercase());
    }

    match mov.kind() {
        MoveKind::Castle { .. } if mov.destination().column() == 6 => buf.push_str(" (O-O)"),
        MoveKind::Castle { .. } => buf.push_str(" (O-O-O)"),
        MoveKind::EnPassant { .. } => buf.push_str(" e.p."),
        _ => {}
    }

    buf
}
