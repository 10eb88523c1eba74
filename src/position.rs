// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::fmt::{self, Write};

use crate::attacks;
use crate::errors::{InvalidSource, MoveError};
use crate::move_generator::{MoveGenerator, MoveVec};
use crate::moves::{Move, MoveRequest};
use crate::status::{self, GameStatus};
use crate::types::TableIndex;
use crate::types::{CastleStatus, Color, Piece, PieceKind, Square, COLORS};

/// Possible errors that can arise when parsing a FEN string into a `Position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    InvalidSideToMove,
    InvalidCastle,
    InvalidEnPassant,
    EmptyHalfmove,
    InvalidHalfmove,
    EmptyFullmove,
    InvalidFullmove,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FenParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}' in FEN", c),
            FenParseError::UnexpectedEnd => write!(f, "unexpected end of FEN"),
            FenParseError::InvalidDigit => write!(f, "invalid empty-square count in FEN"),
            FenParseError::FileDoesNotSumToEight => write!(f, "FEN row does not sum to eight"),
            FenParseError::UnknownPiece => write!(f, "unknown piece letter in FEN"),
            FenParseError::InvalidSideToMove => write!(f, "invalid side to move in FEN"),
            FenParseError::InvalidCastle => write!(f, "invalid castling rights in FEN"),
            FenParseError::InvalidEnPassant => write!(f, "invalid en passant square in FEN"),
            FenParseError::EmptyHalfmove => write!(f, "missing halfmove clock in FEN"),
            FenParseError::InvalidHalfmove => write!(f, "invalid halfmove clock in FEN"),
            FenParseError::EmptyFullmove => write!(f, "missing fullmove number in FEN"),
            FenParseError::InvalidFullmove => write!(f, "invalid fullmove number in FEN"),
        }
    }
}

impl std::error::Error for FenParseError {}

/// The outcome of applying a move to a position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The move was applied; this is the successor position.
    Applied(Position),
    /// A pawn reached the last row without a promotion piece. Nothing was applied; resubmit the
    /// same move with a piece chosen.
    PromotionRequired,
}

impl Transition {
    /// Returns the successor position, if the move was applied.
    pub fn into_position(self) -> Option<Position> {
        match self {
            Transition::Applied(pos) => Some(pos),
            Transition::PromotionRequired => None,
        }
    }
}

/// A game state. Positions are values: every operation that "changes" a position returns a new
/// one and leaves the receiver untouched, so callers may keep as many old positions around as
/// they like.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    board: [Option<Piece>; 64],
    en_passant_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
    side_to_move: Color,
    castle_status: CastleStatus,
}

//
// Board state getters
//

impl Position {
    /// An empty board with White to move, no castling rights and both clocks at zero.
    pub fn new() -> Position {
        Position {
            board: [None; 64],
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 0,
            side_to_move: Color::White,
            castle_status: CastleStatus::NONE,
        }
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn castle_status(&self) -> CastleStatus {
        self.castle_status
    }

    pub fn can_castle_kingside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::kingside(color))
    }

    pub fn can_castle_queenside(&self, color: Color) -> bool {
        self.castle_status.contains(CastleStatus::queenside(color))
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.as_index()]
    }

    /// Iterates over every occupied square in row-major order, starting from a8.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.board
            .iter()
            .enumerate()
            .filter_map(|(idx, piece)| piece.map(|p| (Square::from_index(idx), p)))
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece)| piece == Piece::new(PieceKind::King, color))
            .map(|(sq, _)| sq)
    }
}

//
// Move application and board manipulation
//

impl Position {
    fn add_piece(&mut self, square: Square, piece: Piece) -> Result<(), ()> {
        if self.piece_at(square).is_some() {
            return Err(());
        }

        self.board[square.as_index()] = Some(piece);
        Ok(())
    }

    fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        self.board[square.as_index()].take()
    }

    /// Applies a move produced by the move generator and returns the successor position.
    ///
    /// The move's metadata (capture square, castling rook, double push) is trusted as-is; only
    /// the origin square is re-checked against this position. Use `apply_move` for moves that
    /// did not come straight out of the generator for this exact position.
    pub fn make_move(&self, mov: Move) -> Result<Transition, MoveError> {
        let moving_piece = self
            .piece_at(mov.source())
            .ok_or(InvalidSource::NoPiece)?;
        if moving_piece.color != self.side_to_move {
            return Err(InvalidSource::WrongSide.into());
        }

        let mover = self.side_to_move;
        let piece_to_add = if moving_piece.kind == PieceKind::Pawn
            && mov.destination().row() == mover.promotion_row()
        {
            match mov.promotion_piece() {
                Some(kind) => Piece::new(kind, mover),
                None => return Ok(Transition::PromotionRequired),
            }
        } else {
            moving_piece
        };

        let mut next = self.clone();

        // En-passant is the only capture whose victim does not sit on the destination square.
        let mut captured = None;
        if let Some(ep_victim) = mov.capture_square().filter(|_| mov.is_en_passant()) {
            captured = next.remove_piece(ep_victim);
        }

        if let Some(target) = next.remove_piece(mov.destination()) {
            captured = Some(target);
        }

        next.remove_piece(mov.source());
        next.board[mov.destination().as_index()] = Some(piece_to_add);

        if let Some((rook_from, rook_to)) = mov.castle_rook() {
            let rook = next
                .remove_piece(rook_from)
                .ok_or(MoveError::IllegalMove)?;
            next.add_piece(rook_to, rook)
                .map_err(|_| MoveError::IllegalMove)?;
        }

        // Double pawn pushes set the en-passant square; every other move clears it.
        next.en_passant_square = if mov.is_double_pawn_push() {
            Square::from_coords(
                (mov.source().row() + mov.destination().row()) / 2,
                mov.source().column(),
            )
        } else {
            None
        };

        // Castling rights are only ever revoked: by moving the king, by moving a rook off its
        // corner, or by losing a rook that is still on its corner.
        match moving_piece.kind {
            PieceKind::King => next.castle_status.remove(CastleStatus::both(mover)),
            PieceKind::Rook => next.revoke_rook_corner(mov.source(), mover),
            _ => {}
        }

        if let Some(victim) = captured.filter(|p| p.kind == PieceKind::Rook) {
            next.revoke_rook_corner(mov.destination(), victim.color);
        }

        next.side_to_move = mover.toggle();
        if captured.is_some() || moving_piece.kind == PieceKind::Pawn {
            next.halfmove_clock = 0;
        } else {
            next.halfmove_clock = next.halfmove_clock.saturating_add(1);
        }

        if mover == Color::Black {
            next.fullmove_number = next.fullmove_number.saturating_add(1);
        }

        Ok(Transition::Applied(next))
    }

    fn revoke_rook_corner(&mut self, square: Square, owner: Color) {
        if square == kingside_rook(owner) {
            self.castle_status.remove(CastleStatus::kingside(owner));
        } else if square == queenside_rook(owner) {
            self.castle_status.remove(CastleStatus::queenside(owner));
        }
    }

    /// Validates a caller-supplied move against the legal moves from its origin square and, if
    /// it matches one, applies it.
    ///
    /// The canonical move from the generator supplies all special-move metadata; the request
    /// only contributes its promotion piece. A pawn reaching the last row without one yields
    /// `Transition::PromotionRequired` and this position is left as it was.
    pub fn apply_move<R: Into<MoveRequest>>(&self, request: R) -> Result<Transition, MoveError> {
        let request = request.into();
        let piece = self
            .piece_at(request.source)
            .ok_or(InvalidSource::NoPiece)?;
        if piece.color != self.side_to_move {
            return Err(InvalidSource::WrongSide.into());
        }

        let canonical = self
            .legal_moves(request.source)
            .into_iter()
            .find(|m| m.destination() == request.destination)
            .ok_or(MoveError::IllegalMove)?;

        let mov = match request.promotion {
            None => canonical,
            Some(kind) if canonical.is_promotion() && kind.is_promotion_target() => {
                canonical.with_promotion(kind)
            }
            Some(_) => return Err(MoveError::IllegalMove),
        };

        self.make_move(mov)
    }

    /// The legal moves of the piece on `from`. Empty if the square is empty or holds a piece of
    /// the side not to move.
    pub fn legal_moves(&self, from: Square) -> MoveVec {
        let mut moves = MoveVec::new();
        MoveGenerator::new().legal_moves(self, from, &mut moves);
        moves
    }

    /// Every legal move for the side to move, in row-major board order.
    pub fn all_legal_moves(&self) -> MoveVec {
        let mut moves = MoveVec::new();
        MoveGenerator::new().generate_moves(self, &mut moves);
        moves
    }

    pub fn status(&self) -> GameStatus {
        status::status(self)
    }
}

//
// Board analysis (check detection, legality)
//

impl Position {
    pub fn is_attacked(&self, target: Square, by: Color) -> bool {
        attacks::is_attacked(self, target, by)
    }

    pub fn is_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_attacked(king, color.toggle()),
            None => false,
        }
    }

    /// Legality test for moves that are already known to be pseudolegal: the move is played on a
    /// copy of this position and rejected if it fails or leaves the mover's king attacked.
    ///
    /// Unresolved promotions are probed as queen promotions. The promoted piece occupies the same
    /// square whatever its kind, so the king's safety does not depend on the choice.
    pub fn is_legal_given_pseudolegal(&self, mov: Move) -> bool {
        let probe = if mov.is_promotion() && mov.promotion_piece().is_none() {
            mov.with_promotion(PieceKind::Queen)
        } else {
            mov
        };

        let side = self.side_to_move();
        match self.make_move(probe) {
            Ok(Transition::Applied(new_pos)) => !new_pos.is_check(side),
            Ok(Transition::PromotionRequired) | Err(_) => {
                trace!("rejecting {}: transition failed", mov);
                false
            }
        }
    }
}

//
// FEN parsing and generation.
//
// The routines in this block are oriented around FEN, a simple notation for chess positions.
// Positions can be created by parsing FEN and FEN can be produced from particular positions.
//

impl Position {
    /// The standard starting position.
    pub fn from_start_position() -> Position {
        const BACK_ROW: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut pos = Position::new();
        for (column, &kind) in BACK_ROW.iter().enumerate() {
            for &color in COLORS.iter() {
                pos.board[color.home_row() * 8 + column] = Some(Piece::new(kind, color));
                pos.board[color.pawn_row() * 8 + column] =
                    Some(Piece::new(PieceKind::Pawn, color));
            }
        }

        pos.castle_status = CastleStatus::WHITE | CastleStatus::BLACK;
        pos.fullmove_number = 1;
        pos
    }

    /// Constructs a new position from a FEN representation of a board position.
    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Position, FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat(iter: &mut Stream<'_>, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn advance(iter: &mut Stream<'_>) {
            let _ = iter.next();
        }

        fn peek(iter: &mut Stream<'_>) -> Result<char, FenParseError> {
            iter.peek().cloned().ok_or(FenParseError::UnexpectedEnd)
        }

        fn eat_side_to_move(iter: &mut Stream<'_>) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            advance(iter);
            Ok(side)
        }

        fn eat_castle_status(iter: &mut Stream<'_>) -> Result<CastleStatus, FenParseError> {
            if peek(iter)? == '-' {
                advance(iter);
                return Ok(CastleStatus::NONE);
            }

            let mut status = CastleStatus::NONE;
            for _ in 0..4 {
                match peek(iter)? {
                    'K' => status |= CastleStatus::WHITE_KINGSIDE,
                    'k' => status |= CastleStatus::BLACK_KINGSIDE,
                    'Q' => status |= CastleStatus::WHITE_QUEENSIDE,
                    'q' => status |= CastleStatus::BLACK_QUEENSIDE,
                    ' ' => break,
                    _ => return Err(FenParseError::InvalidCastle),
                }

                advance(iter);
            }

            Ok(status)
        }

        fn eat_en_passant(iter: &mut Stream<'_>) -> Result<Option<Square>, FenParseError> {
            let c = peek(iter)?;
            if c == '-' {
                advance(iter);
                return Ok(None);
            }

            advance(iter);
            let rank = peek(iter).map_err(|_| FenParseError::InvalidEnPassant)?;
            advance(iter);
            let name: String = [c, rank].iter().collect();
            Square::parse(&name)
                .map(Some)
                .ok_or(FenParseError::InvalidEnPassant)
        }

        fn eat_number(
            iter: &mut Stream<'_>,
            empty: FenParseError,
            invalid: FenParseError,
        ) -> Result<u32, FenParseError> {
            let mut buf = String::new();
            while let Some(&c) = iter.peek() {
                if !c.is_ascii_digit() {
                    break;
                }

                buf.push(c);
                advance(iter);
            }

            if buf.is_empty() {
                return Err(empty);
            }

            buf.parse::<u32>().map_err(|_| invalid)
        }

        let mut pos = Position::new();
        let iter = &mut fen.as_ref().chars().peekable();
        for row in 0..8 {
            let mut column = 0;
            while column < 8 {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if c.is_ascii_digit() {
                    if c < '1' || c > '8' {
                        return Err(FenParseError::InvalidDigit);
                    }

                    column += c as usize - '0' as usize;
                    if column > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    advance(iter);
                    continue;
                }

                // if it's not a digit, it represents a piece.
                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                pos.board[row * 8 + column] = Some(piece);
                advance(iter);
                column += 1;
            }

            if row != 7 {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        pos.side_to_move = eat_side_to_move(iter)?;
        eat(iter, ' ')?;
        pos.castle_status = eat_castle_status(iter)?;
        eat(iter, ' ')?;
        pos.en_passant_square = eat_en_passant(iter)?;
        eat(iter, ' ')?;
        pos.halfmove_clock = eat_number(
            iter,
            FenParseError::EmptyHalfmove,
            FenParseError::InvalidHalfmove,
        )?;
        eat(iter, ' ')?;
        pos.fullmove_number = eat_number(
            iter,
            FenParseError::EmptyFullmove,
            FenParseError::InvalidFullmove,
        )?;
        Ok(pos)
    }

    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for row in 0..8 {
            let mut empty_squares = 0;
            for column in 0..8 {
                if let Some(piece) = self.board[row * 8 + column] {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if row != 7 {
                buf.push('/');
            }
        }

        buf.push(' ');
        write!(&mut buf, "{}", self.side_to_move).unwrap();
        buf.push(' ');
        if self.castle_status.is_empty() {
            buf.push('-');
        }
        if self.can_castle_kingside(Color::White) {
            buf.push('K');
        }
        if self.can_castle_queenside(Color::White) {
            buf.push('Q');
        }
        if self.can_castle_kingside(Color::Black) {
            buf.push('k');
        }
        if self.can_castle_queenside(Color::Black) {
            buf.push('q');
        }
        buf.push(' ');
        if let Some(ep_square) = self.en_passant_square() {
            write!(&mut buf, "{}", ep_square).unwrap();
        } else {
            buf.push('-');
        }
        write!(
            &mut buf,
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_number()
        )
        .unwrap();
        buf
    }
}

//
// Trait implementations
//

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..8 {
            for column in 0..8 {
                if let Some(piece) = self.board[row * 8 + column] {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", 8 - row)?;
        }

        for _ in 0..8 {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for file in "abcdefgh".chars() {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::from_start_position()
    }
}

//
// Helper functions
//

pub(crate) fn kingside_rook(color: Color) -> Square {
    match color {
        Color::White => Square::H1,
        Color::Black => Square::H8,
    }
}

pub(crate) fn queenside_rook(color: Color) -> Square {
    match color {
        Color::White => Square::A1,
        Color::Black => Square::A8,
    }
}
