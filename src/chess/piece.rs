//! Chess pieces and the way each of them moves
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use super::*;

use Color::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of a chess piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Kind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl Kind {
    /// The number of piece types
    pub const COUNT: usize = Kind::King as usize + 1;

    /// All piece types, from pawn to king
    pub const ALL: [Kind; Kind::COUNT] = [
        Kind::Pawn, Kind::Knight, Kind::Bishop, Kind::Rook, Kind::Queen, Kind::King,
    ];

    /// The upper case letter naming the piece type
    pub fn letter(self) -> char {
        match self {
            Kind::Pawn => 'P',
            Kind::Knight => 'N',
            Kind::Bishop => 'B',
            Kind::Rook => 'R',
            Kind::Queen => 'Q',
            Kind::King => 'K',
        }
    }

    /// The inverse of `letter`, ignoring case.
    pub fn from_letter(letter: char) -> Option<Kind> {
        Kind::ALL.iter().copied().find(|kind| kind.letter() == letter.to_ascii_uppercase())
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.letter().fmt(f)
    }
}

impl FromStr for Kind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(letter), None) => {
                Kind::from_letter(letter).ok_or_else(|| Error::InvalidPiece(s.to_owned()))
            },
            _ => Err(Error::InvalidPiece(s.to_owned())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The occupant of a square: a piece of some color, or nothing.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Piece {
    King(Color),
    Queen(Color),
    Rook(Color),
    Bishop(Color),
    Knight(Color),
    Pawn(Color),
    Empty,
}

impl Piece {
    /// Returns the piece of the given color and kind.
    pub fn new(color: Color, kind: Kind) -> Piece {
        match kind {
            Kind::King => Piece::King(color),
            Kind::Queen => Piece::Queen(color),
            Kind::Rook => Piece::Rook(color),
            Kind::Bishop => Piece::Bishop(color),
            Kind::Knight => Piece::Knight(color),
            Kind::Pawn => Piece::Pawn(color),
        }
    }

    /// Returns the piece's color, or `None` for an empty square.
    pub fn color(self) -> Option<Color> {
        match self {
            Piece::King(color)
            | Piece::Queen(color)
            | Piece::Rook(color)
            | Piece::Bishop(color)
            | Piece::Knight(color)
            | Piece::Pawn(color) => Some(color),
            Piece::Empty => None,
        }
    }

    /// Returns the piece's kind, or `None` for an empty square.
    pub fn kind(self) -> Option<Kind> {
        match self {
            Piece::King(_) => Some(Kind::King),
            Piece::Queen(_) => Some(Kind::Queen),
            Piece::Rook(_) => Some(Kind::Rook),
            Piece::Bishop(_) => Some(Kind::Bishop),
            Piece::Knight(_) => Some(Kind::Knight),
            Piece::Pawn(_) => Some(Kind::Pawn),
            Piece::Empty => None,
        }
    }

    /// Returns `true` for an empty square.
    pub fn is_empty(self) -> bool {
        self == Piece::Empty
    }

    /// Returns `true` if this is a piece of the given color.
    pub fn is_color(self, color: Color) -> bool {
        self.color() == Some(color)
    }

    /// Returns `true` for pieces that move along a ray and cannot jump over other pieces.
    pub fn is_sliding(self) -> bool {
        match self {
            Piece::Queen(_) | Piece::Rook(_) | Piece::Bishop(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if the shape of the move from `source` to `target` suits this piece.
    ///
    /// This does not check whether a sliding piece's path is clear, nor whether `target` holds a
    /// piece of the same color. Pawns look at `board` because whether they may step forward or
    /// diagonally depends on what they would land on.
    pub fn reaches(self, source: Position, target: Position, board: &Board) -> bool {
        if source == target {
            return false;
        }

        match self {
            Piece::King(_) => {
                source.column_distance(target).abs() <= 1 && source.rank_distance(target).abs() <= 1
            },
            Piece::Queen(_) => {
                source.is_diagonal_movement(target) || source.is_cross_movement(target)
            },
            Piece::Rook(_) => source.is_cross_movement(target),
            Piece::Bishop(_) => source.is_diagonal_movement(target),
            Piece::Knight(_) => source.is_knight_movement(target),
            Piece::Pawn(color) => pawn_reaches(color, source, target, board),
            Piece::Empty => false,
        }
    }

    /// Returns `true` if this piece, standing on `source`, can move to `target` on `board`.
    ///
    /// Combines `reaches` with the path check for sliding pieces. Capturing a piece of the same
    /// color is left to the board.
    pub fn is_movable(self, source: Position, target: Position, board: &Board) -> bool {
        self.reaches(source, target, board)
            && (!self.is_sliding() || board.is_path_clear(source, target))
    }

    /// The character used to draw the piece. Black pieces are upper case, white pieces lower case
    /// and an empty square is `.`.
    pub fn glyph(self) -> char {
        match (self.color(), self.kind()) {
            (Some(Black), Some(kind)) => kind.letter(),
            (Some(White), Some(kind)) => kind.letter().to_ascii_lowercase(),
            _ => '.',
        }
    }

    /// The inverse of `glyph`.
    pub fn from_glyph(glyph: char) -> Option<Piece> {
        if glyph == '.' {
            return Some(Piece::Empty);
        }
        let color = if glyph.is_ascii_uppercase() { Black } else { White };

        Kind::from_letter(glyph).map(|kind| Piece::new(color, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.glyph().fmt(f)
    }
}

impl FromStr for Piece {
    type Err = Error;

    /// Parses a single glyph, as written by `Display`.
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(glyph), None) => {
                Piece::from_glyph(glyph).ok_or_else(|| Error::InvalidPiece(s.to_owned()))
            },
            _ => Err(Error::InvalidPiece(s.to_owned())),
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::Empty
    }
}

/// Pawns step forward onto an empty square, two squares from their starting rank, and capture one
/// square diagonally forward.
fn pawn_reaches(color: Color, source: Position, target: Position, board: &Board) -> bool {
    let (forward, start) = match color {
        White => (1, Rank::R2),
        Black => (-1, Rank::R7),
    };
    let occupant = board.piece_at(target);

    match (source.column_distance(target).abs(), source.rank_distance(target) * forward) {
        (0, 1) => occupant.is_empty(),
        (0, 2) => {
            source.rank() == start && occupant.is_empty() && board.is_path_clear(source, target)
        },
        (1, 1) => occupant.is_color(!color),
        _ => false,
    }
}
