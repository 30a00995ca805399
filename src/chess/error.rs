//! Defines the error types needed by the chess module
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use super::Color;
use super::game::GameStatus;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Why a move was rejected by the board
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum IllegalMoveReason {
    /// There is no piece on the source square
    EmptySource,
    /// The target square holds a piece of the mover's own color
    SameColorTarget,
    /// The piece does not move that way
    Unreachable,
    /// Another piece stands between the source and target squares
    Blocked,
}

impl fmt::Display for IllegalMoveReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use IllegalMoveReason::*;

        match self {
            EmptySource => "there is no piece on the source square",
            SameColorTarget => "cannot capture a piece of the same color",
            Unreachable => "the piece cannot move that way",
            Blocked => "the path is blocked by another piece",
        }.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Not a file label (`a`-`h`) or rank label (`1`-`8`)
    InvalidCoordinate(String),
    /// Not a two character square label such as `e4`
    InvalidPosition(String),
    /// Not a color name (`white`, `black`, `w` or `b`)
    InvalidColor(String),
    /// Not a piece letter or board glyph
    InvalidPiece(String),
    /// Cannot parse a board diagram, or a board is missing squares
    InvalidBoard,
    /// A step would leave the board
    OutOfBounds,
    /// The move breaks the rules
    IllegalMove(IllegalMoveReason),
    /// The piece belongs to the player who is not on move. Holds the color on move.
    NotYourTurn(Color),
    /// No more moves can be made. Holds the final status.
    GameOver(GameStatus),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            InvalidCoordinate(label) => write!(f, "invalid coordinate '{}'", label),
            InvalidPosition(text) => {
                write!(f, "invalid position '{}': expected a square from a1 to h8", text)
            },
            InvalidColor(text) => write!(f, "invalid color '{}'", text),
            InvalidPiece(text) => write!(f, "invalid piece '{}'", text),
            InvalidBoard => "cannot parse board".fmt(f),
            OutOfBounds => "position is off the board".fmt(f),
            IllegalMove(reason) => write!(f, "illegal move: {}", reason),
            NotYourTurn(turn) => write!(f, "it is {}'s turn", turn),
            GameOver(status) => write!(f, "the game is over ({})", status),
        }
    }
}

impl std::error::Error for Error { }

impl From<IllegalMoveReason> for Error {
    fn from(reason: IllegalMoveReason) -> Self {
        Error::IllegalMove(reason)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` module
pub type Result<T, E = Error> = std::result::Result<T, E>;
