// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::position::Position;
use crate::types::{Color, Direction, Piece, PieceKind, Square};
use crate::types::{DIAGONAL_DIRECTIONS, ORTHOGONAL_DIRECTIONS};

/// Knight jumps, as (row, column) offsets.
pub static KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// King steps, as (row, column) offsets, in row-major order.
pub static KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Returns whether the `target` square is attacked by any piece of color `by`. The target
/// square itself may be empty or occupied by either color.
pub fn is_attacked(pos: &Position, target: Square, by: Color) -> bool {
    let holds = |sq: Option<Square>, kind: PieceKind| match sq.and_then(|s| pos.piece_at(s)) {
        Some(piece) => piece == Piece::new(kind, by),
        None => false,
    };

    // A pawn attacks diagonally forward, so an attacking pawn sits one step "behind" the target
    // from its own point of view.
    let pawn_row = -by.pawn_direction();
    if holds(target.offset(pawn_row, -1), PieceKind::Pawn)
        || holds(target.offset(pawn_row, 1), PieceKind::Pawn)
    {
        return true;
    }

    // Knight and king moves are symmetric.
    if KNIGHT_OFFSETS
        .iter()
        .any(|&(dr, dc)| holds(target.offset(dr, dc), PieceKind::Knight))
    {
        return true;
    }

    if KING_OFFSETS
        .iter()
        .any(|&(dr, dc)| holds(target.offset(dr, dc), PieceKind::King))
    {
        return true;
    }

    let bishop_like = [PieceKind::Bishop, PieceKind::Queen];
    let rook_like = [PieceKind::Rook, PieceKind::Queen];
    DIAGONAL_DIRECTIONS
        .iter()
        .any(|&dir| slider_on_ray(pos, target, dir, by, &bishop_like))
        || ORTHOGONAL_DIRECTIONS
            .iter()
            .any(|&dir| slider_on_ray(pos, target, dir, by, &rook_like))
}

/// Walks outward from `target` along `dir` and reports whether the first piece encountered is
/// one of `kinds` and belongs to `by`. Any other piece blocks the ray.
fn slider_on_ray(
    pos: &Position,
    target: Square,
    dir: Direction,
    by: Color,
    kinds: &[PieceKind],
) -> bool {
    let mut cursor = target.towards(dir);
    while let Some(sq) = cursor {
        if let Some(piece) = pos.piece_at(sq) {
            return piece.color == by && kinds.contains(&piece.kind);
        }

        cursor = sq.towards(dir);
    }

    false
}

#[cfg(test)]
mod tests {
    use super::is_attacked;
    use crate::position::Position;
    use crate::types::{Color, Square};

    #[test]
    fn pawn_attacks_diagonally_forward() {
        let pos = Position::from_fen("8/8/8/8/4P3/8/8/8 w - - 0 1").unwrap();
        assert!(is_attacked(&pos, Square::D5, Color::White));
        assert!(is_attacked(&pos, Square::F5, Color::White));
        assert!(!is_attacked(&pos, Square::E5, Color::White));
        assert!(!is_attacked(&pos, Square::D3, Color::White));
    }

    #[test]
    fn black_pawn_attacks_downward() {
        let pos = Position::from_fen("8/8/8/4p3/8/8/8/8 w - - 0 1").unwrap();
        assert!(is_attacked(&pos, Square::D4, Color::Black));
        assert!(is_attacked(&pos, Square::F4, Color::Black));
        assert!(!is_attacked(&pos, Square::D6, Color::Black));
    }

    #[test]
    fn knight_attacks() {
        let pos = Position::from_fen("8/8/8/8/8/8/8/1N6 w - - 0 1").unwrap();
        assert!(is_attacked(&pos, Square::A3, Color::White));
        assert!(is_attacked(&pos, Square::C3, Color::White));
        assert!(is_attacked(&pos, Square::D2, Color::White));
        assert!(!is_attacked(&pos, Square::B3, Color::White));
        assert!(!is_attacked(&pos, Square::A3, Color::Black));
    }

    #[test]
    fn king_attacks_adjacent() {
        let pos = Position::from_fen("8/8/8/3k4/8/8/8/8 w - - 0 1").unwrap();
        assert!(is_attacked(&pos, Square::C6, Color::Black));
        assert!(is_attacked(&pos, Square::E4, Color::Black));
        assert!(!is_attacked(&pos, Square::D3, Color::Black));
    }

    #[test]
    fn sliding_attacks_stop_at_blockers() {
        let pos = Position::from_fen("8/8/4q3/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(is_attacked(&pos, Square::E2, Color::Black));
        assert!(!is_attacked(&pos, Square::E1, Color::Black));
        assert!(is_attacked(&pos, Square::A2, Color::Black));
    }

    #[test]
    fn rook_does_not_attack_diagonally() {
        let pos = Position::from_fen("8/8/8/3r4/8/8/8/8 w - - 0 1").unwrap();
        assert!(is_attacked(&pos, Square::D1, Color::Black));
        assert!(is_attacked(&pos, Square::H5, Color::Black));
        assert!(!is_attacked(&pos, Square::E4, Color::Black));
    }

    #[test]
    fn own_blocker_stops_bishop() {
        let pos = Position::from_fen("8/8/8/8/8/2p5/8/b7 w - - 0 1").unwrap();
        assert!(is_attacked(&pos, Square::B2, Color::Black));
        assert!(!is_attacked(&pos, Square::D4, Color::Black));
    }
}
