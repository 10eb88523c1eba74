// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Serializable move records and deterministic replay of a recorded game.
//!
//! A `MoveRecord` spells out every flag of a move so it can cross a process or network boundary
//! and be read by anything that understands JSON. When a record is read back, only its origin,
//! destination and promotion piece are trusted; everything else is regenerated by the move
//! generator against the position the record is applied to.
use std::convert::TryFrom;
use std::fmt;

use crate::errors::MoveError;
use crate::moves::{Move, MoveRequest};
use crate::position::{Position, Transition};
use crate::types::{Piece, PieceKind, Square};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRecord {
    pub from: String,
    pub to: String,
    /// The promotion piece as a lowercase FEN letter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion: Option<String>,
    #[serde(default)]
    pub is_en_passant: bool,
    #[serde(default)]
    pub is_castling: bool,
    #[serde(default)]
    pub is_double_pawn_push: bool,
    /// The captured piece as a FEN letter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub captured_piece: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rook_from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rook_to: Option<String>,
}

impl MoveRecord {
    /// A bare record carrying only an origin and a destination.
    pub fn new<S: Into<String>>(from: S, to: S) -> MoveRecord {
        MoveRecord {
            from: from.into(),
            to: to.into(),
            promotion: None,
            is_en_passant: false,
            is_castling: false,
            is_double_pawn_push: false,
            captured_piece: None,
            rook_from: None,
            rook_to: None,
        }
    }

    /// Parses the parts of this record a position needs to identify the move.
    pub fn to_request(&self) -> Result<MoveRequest, MoveError> {
        let source = self.from.parse::<Square>()?;
        let destination = self.to.parse::<Square>()?;
        let promotion = match self.promotion {
            Some(ref letter) => Some(parse_kind(letter)?),
            None => None,
        };

        Ok(MoveRequest {
            source,
            destination,
            promotion,
        })
    }
}

fn parse_kind(letter: &str) -> Result<PieceKind, MoveError> {
    let malformed = || MoveError::MalformedTransport(letter.to_owned());
    let mut chars = letter.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => PieceKind::try_from(c).map_err(|_| malformed()),
        _ => Err(malformed()),
    }
}

impl From<&Move> for MoveRecord {
    fn from(mov: &Move) -> MoveRecord {
        let (rook_from, rook_to) = match mov.castle_rook() {
            Some((from, to)) => (Some(from.to_string()), Some(to.to_string())),
            None => (None, None),
        };

        MoveRecord {
            from: mov.source().to_string(),
            to: mov.destination().to_string(),
            promotion: mov.promotion_piece().map(|k| k.as_char().to_string()),
            is_en_passant: mov.is_en_passant(),
            is_castling: mov.is_castle(),
            is_double_pawn_push: mov.is_double_pawn_push(),
            captured_piece: mov.captured_piece().map(|p: Piece| p.to_string()),
            rook_from,
            rook_to,
        }
    }
}

impl From<Move> for MoveRecord {
    fn from(mov: Move) -> MoveRecord {
        MoveRecord::from(&mov)
    }
}

/// Why a replay stopped before the end of its record list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplayHalt {
    /// The record could not be parsed or applied.
    Rejected(MoveError),
    /// The record moved a pawn to the last row without naming a promotion piece.
    PromotionMissing,
}

impl fmt::Display for ReplayHalt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReplayHalt::Rejected(err) => write!(f, "{}", err),
            ReplayHalt::PromotionMissing => write!(f, "promotion piece missing"),
        }
    }
}

/// The outcome of replaying a list of move records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replay {
    /// The last position successfully reached.
    pub position: Position,
    /// How many records were applied.
    pub applied: usize,
    /// The index of the record that stopped the replay, and why. `None` if every record applied.
    pub halted: Option<(usize, ReplayHalt)>,
}

impl Replay {
    pub fn is_complete(&self) -> bool {
        self.halted.is_none()
    }
}

/// Applies `records` in order starting from `start`. Replay stops at the first record that does
/// not apply, and the position reached so far is returned. Stopping early is not an error.
pub fn replay(start: &Position, records: &[MoveRecord]) -> Replay {
    let mut position = start.clone();
    for (index, record) in records.iter().enumerate() {
        let halt = match record.to_request().and_then(|req| position.apply_move(req)) {
            Ok(Transition::Applied(next)) => {
                position = next;
                continue;
            }
            Ok(Transition::PromotionRequired) => ReplayHalt::PromotionMissing,
            Err(err) => ReplayHalt::Rejected(err),
        };

        warn!(
            "replay stopped at record {} ({}-{}): {}",
            index, record.from, record.to, halt
        );
        return Replay {
            position,
            applied: index,
            halted: Some((index, halt)),
        };
    }

    Replay {
        position,
        applied: records.len(),
        halted: None,
    }
}

#[cfg(test)]
mod tests {
    use super::{replay, MoveRecord, ReplayHalt};
    use crate::errors::{InvalidSource, MoveError};
    use crate::moves::{Move, MoveRequest};
    use crate::position::Position;
    use crate::types::{Color, Piece, PieceKind, Square};

    fn records(moves: &[(&str, &str)]) -> Vec<MoveRecord> {
        moves
            .iter()
            .map(|&(from, to)| MoveRecord::new(from, to))
            .collect()
    }

    #[test]
    fn record_from_castle() {
        let record = MoveRecord::from(Move::castle(
            Square::E1,
            Square::G1,
            Square::H1,
            Square::F1,
        ));
        assert!(record.is_castling);
        assert_eq!(Some("h1".to_owned()), record.rook_from);
        assert_eq!(Some("f1".to_owned()), record.rook_to);
        assert!(!record.is_en_passant);
    }

    #[test]
    fn record_from_promotion_capture() {
        let mov = Move::promotion(
            Square::B7,
            Square::A8,
            Some(Piece::new(PieceKind::Rook, Color::Black)),
        )
        .with_promotion(PieceKind::Knight);
        let record = MoveRecord::from(mov);
        assert_eq!(Some("n".to_owned()), record.promotion);
        assert_eq!(Some("r".to_owned()), record.captured_piece);
    }

    #[test]
    fn request_parsing() {
        let mut record = MoveRecord::new("E7", " e8");
        record.promotion = Some("Q".to_owned());
        assert_eq!(
            Ok(MoveRequest::new(Square::E7, Square::E8).promote_to(PieceKind::Queen)),
            record.to_request()
        );
    }

    #[test]
    fn malformed_square() {
        let record = MoveRecord::new("e9", "e4");
        assert_eq!(
            Err(MoveError::MalformedTransport("e9".to_owned())),
            record.to_request()
        );
    }

    #[test]
    fn malformed_promotion() {
        let mut record = MoveRecord::new("e7", "e8");
        record.promotion = Some("queen".to_owned());
        assert_eq!(
            Err(MoveError::MalformedTransport("queen".to_owned())),
            record.to_request()
        );
    }

    #[test]
    fn json_field_names() {
        let record = MoveRecord::from(Move::double_pawn_push(Square::E2, Square::E4));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!("e2", json["from"]);
        assert_eq!("e4", json["to"]);
        assert_eq!(true, json["isDoublePawnPush"]);
        assert_eq!(false, json["isEnPassant"]);
        assert_eq!(false, json["isCastling"]);
        assert!(json.get("promotion").is_none());
    }

    #[test]
    fn json_defaults() {
        let record: MoveRecord = serde_json::from_str(r#"{"from":"g1","to":"f3"}"#).unwrap();
        assert_eq!(MoveRecord::new("g1", "f3"), record);
    }

    #[test]
    fn full_replay() {
        let result = replay(
            &Position::from_start_position(),
            &records(&[("e2", "e4"), ("e7", "e5"), ("g1", "f3")]),
        );
        assert!(result.is_complete());
        assert_eq!(3, result.applied);
        assert_eq!(
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2",
            result.position.as_fen()
        );
    }

    #[test]
    fn replay_stops_at_first_failure() {
        let start = Position::from_start_position();
        let result = replay(
            &start,
            &records(&[("e2", "e4"), ("e2", "e4"), ("d7", "d5")]),
        );
        assert_eq!(1, result.applied);
        assert_eq!(
            Some((
                1,
                ReplayHalt::Rejected(MoveError::InvalidSource(InvalidSource::NoPiece))
            )),
            result.halted
        );
        assert_eq!(
            Some(Piece::new(PieceKind::Pawn, Color::White)),
            result.position.piece_at(Square::E4)
        );
    }

    #[test]
    fn replay_stops_on_malformed_square() {
        let result = replay(&Position::from_start_position(), &records(&[("z9", "e4")]));
        assert_eq!(0, result.applied);
        assert_eq!(Position::from_start_position(), result.position);
    }

    #[test]
    fn replay_stops_on_missing_promotion() {
        let start = Position::from_fen("k7/4P3/8/8/8/8/8/K7 w - - 0 1").unwrap();
        let result = replay(&start, &records(&[("e7", "e8")]));
        assert_eq!(Some((0, ReplayHalt::PromotionMissing)), result.halted);
        assert_eq!(start, result.position);
    }

    #[test]
    fn replay_ignores_informational_flags() {
        let mut bogus = MoveRecord::new("e2", "e4");
        bogus.is_castling = true;
        bogus.captured_piece = Some("q".to_owned());
        let result = replay(&Position::from_start_position(), &[bogus]);
        assert!(result.is_complete());
        assert_eq!(Some(Square::E3), result.position.en_passant_square());
    }
}
