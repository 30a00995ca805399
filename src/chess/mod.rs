//! The `chess` module implements the rules of the game: board geometry, piece movement, turn
//! order and board mutation.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use std::fmt;
use std::iter::FusedIterator;
use std::ops;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use error::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Color {
    White,
    Black,
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use chessgame::chess::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }.fmt(f)
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Accepts the full name or its first letter, in lower case.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "w"|"white" => Ok(Color::White),
            "b"|"black" => Ok(Color::Black),
            _           => Err(Error::InvalidColor(s.to_owned())),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Vertical column of the board, labeled from left to right from `White`'s perspective as
/// `A` through `H`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 1, B = 2, C = 3, D = 4, E = 5, F = 6, G = 7, H = 8,
}

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize;

    /// All files, from `A` to `H`
    pub const ALL: [File; File::COUNT] = [
        File::A, File::B, File::C, File::D, File::E, File::F, File::G, File::H,
    ];

    /// Returns the file's coordinate, from 1 (`A`) to 8 (`H`).
    pub fn index(self) -> i8 {
        self as i8
    }

    /// Returns the file `offset` columns away.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if the result would leave the board.
    pub fn step(self, offset: i8) -> Result<File> {
        self.index().checked_add(offset).ok_or(Error::OutOfBounds).and_then(File::try_from)
    }

    /// Returns `true` if `step(offset)` would stay on the board.
    pub fn can_step(self, offset: i8) -> bool {
        self.step(offset).is_ok()
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            File::A => "a",
            File::B => "b",
            File::C => "c",
            File::D => "d",
            File::E => "e",
            File::F => "f",
            File::G => "g",
            File::H => "h",
        }.fmt(f)
    }
}

impl FromStr for File {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "a" => Ok(File::A),
            "b" => Ok(File::B),
            "c" => Ok(File::C),
            "d" => Ok(File::D),
            "e" => Ok(File::E),
            "f" => Ok(File::F),
            "g" => Ok(File::G),
            "h" => Ok(File::H),
            _   => Err(Error::InvalidCoordinate(s.to_owned())),
        }
    }
}

impl Default for File {
    fn default() -> Self {
        File::A
    }
}

impl TryFrom<i8> for File {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self> {
        if 1 <= value && value <= File::COUNT as i8 {
            Ok(File::ALL[value as usize - 1])
        } else {
            Err(Error::OutOfBounds)
        }
    }
}

impl From<File> for i8 {
    fn from(value: File) -> Self {
        value.index()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Horizontal row of the board, labeled from nearest to farthest from `White`'s perspective
/// as `R1` through `R8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    R1 = 1, R2 = 2, R3 = 3, R4 = 4, R5 = 5, R6 = 6, R7 = 7, R8 = 8,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize;

    /// All ranks, from `R1` to `R8`
    pub const ALL: [Rank; Rank::COUNT] = [
        Rank::R1, Rank::R2, Rank::R3, Rank::R4, Rank::R5, Rank::R6, Rank::R7, Rank::R8,
    ];

    /// Returns the rank's coordinate, from 1 to 8.
    pub fn index(self) -> i8 {
        self as i8
    }

    /// Returns the rank `offset` rows away.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if the result would leave the board.
    pub fn step(self, offset: i8) -> Result<Rank> {
        self.index().checked_add(offset).ok_or(Error::OutOfBounds).and_then(Rank::try_from)
    }

    /// Returns `true` if `step(offset)` would stay on the board.
    pub fn can_step(self, offset: i8) -> bool {
        self.step(offset).is_ok()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::R1 => "1",
            Rank::R2 => "2",
            Rank::R3 => "3",
            Rank::R4 => "4",
            Rank::R5 => "5",
            Rank::R6 => "6",
            Rank::R7 => "7",
            Rank::R8 => "8",
        }.fmt(f)
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" => Ok(Rank::R1),
            "2" => Ok(Rank::R2),
            "3" => Ok(Rank::R3),
            "4" => Ok(Rank::R4),
            "5" => Ok(Rank::R5),
            "6" => Ok(Rank::R6),
            "7" => Ok(Rank::R7),
            "8" => Ok(Rank::R8),
            _   => Err(Error::InvalidCoordinate(s.to_owned())),
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::R1
    }
}

impl TryFrom<i8> for Rank {
    type Error = Error;

    fn try_from(value: i8) -> Result<Self> {
        if 1 <= value && value <= Rank::COUNT as i8 {
            Ok(Rank::ALL[value as usize - 1])
        } else {
            Err(Error::OutOfBounds)
        }
    }
}

impl From<Rank> for i8 {
    fn from(value: Rank) -> Self {
        value.index()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// One of the eight unit steps a piece can take across the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum Direction {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    /// All eight directions
    pub const ALL: [Direction; 8] = [
        Direction::North, Direction::South, Direction::East, Direction::West,
        Direction::NorthEast, Direction::NorthWest, Direction::SouthEast, Direction::SouthWest,
    ];

    /// Directions along a single rank or file
    pub const CROSS: [Direction; 4] = [
        Direction::North, Direction::South, Direction::East, Direction::West,
    ];

    /// Diagonal directions
    pub const DIAGONAL: [Direction; 4] = [
        Direction::NorthEast, Direction::NorthWest, Direction::SouthEast, Direction::SouthWest,
    ];

    /// The change in file for one step (`East` is positive).
    pub fn column(self) -> i8 {
        use Direction::*;

        match self {
            North | South => 0,
            East | NorthEast | SouthEast => 1,
            West | NorthWest | SouthWest => -1,
        }
    }

    /// The change in rank for one step (`North` is positive).
    pub fn rank(self) -> i8 {
        use Direction::*;

        match self {
            East | West => 0,
            North | NorthEast | NorthWest => 1,
            South | SouthEast | SouthWest => -1,
        }
    }

    /// Returns the direction with the given unit vector, or `None` if the vector is not one of the
    /// eight unit steps.
    pub fn from_vector(column: i8, rank: i8) -> Option<Direction> {
        Direction::ALL.iter()
            .copied()
            .find(|d| d.column() == column && d.rank() == rank)
    }

    /// Returns `true` for the four diagonal directions.
    pub fn is_diagonal(self) -> bool {
        self.column() != 0 && self.rank() != 0
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board, labeled using the `File` and `Rank` as coordinates.
///
/// Positions are ordered rank by rank, starting with `a1`, `b1`, ..., `h1`, `a2`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    // field order gives the rank-major ordering
    rank: Rank,
    file: File,
}

impl Position {
    /// The number of squares
    pub const COUNT: usize = File::COUNT * Rank::COUNT;

    /// Returns a position from its file and rank
    pub fn new(file: File, rank: Rank) -> Position {
        Position { rank, file }
    }

    /// Returns the position's file
    pub fn file(self) -> File {
        self.file
    }

    /// Returns the position's rank
    pub fn rank(self) -> Rank {
        self.rank
    }

    /// Returns an iterator over all 64 squares, from `a1` to `h8`.
    pub fn all() -> impl Iterator<Item = Position> {
        Rank::ALL.iter().flat_map(|&rank| {
            File::ALL.iter().map(move |&file| Position::new(file, rank))
        })
    }

    /// Index of the square into a 64 element array, in the same order as `all()`.
    pub(crate) fn index(self) -> usize {
        (self.rank.index() as usize - 1) * File::COUNT + (self.file.index() as usize - 1)
    }

    /// Returns the adjacent position in the given direction.
    ///
    /// # Errors
    ///
    /// Returns `Error::OutOfBounds` if the step would leave the board.
    pub fn step(self, direction: Direction) -> Result<Position> {
        Ok(Position::new(self.file.step(direction.column())?, self.rank.step(direction.rank())?))
    }

    /// Returns `true` if `step(direction)` would stay on the board.
    pub fn can_step(self, direction: Direction) -> bool {
        self.file.can_step(direction.column()) && self.rank.can_step(direction.rank())
    }

    /// Returns an iterator over the squares reached by repeatedly stepping in `direction`, up to
    /// the edge of the board. The starting position is not included.
    pub fn ray(self, direction: Direction) -> Ray {
        Ray {
            next: self.step(direction).ok(),
            direction,
        }
    }

    /// Signed distance in files from `self` to `target`.
    pub fn column_distance(self, target: Position) -> i8 {
        target.file.index() - self.file.index()
    }

    /// Signed distance in ranks from `self` to `target`.
    pub fn rank_distance(self, target: Position) -> i8 {
        target.rank.index() - self.rank.index()
    }

    /// Returns `true` if `target` lies on one of the diagonals through `self`.
    pub fn is_diagonal_movement(self, target: Position) -> bool {
        let columns = self.column_distance(target);
        columns != 0 && columns.abs() == self.rank_distance(target).abs()
    }

    /// Returns `true` if `target` shares exactly one of the rank or file of `self`.
    pub fn is_cross_movement(self, target: Position) -> bool {
        (self.column_distance(target) == 0) != (self.rank_distance(target) == 0)
    }

    /// Returns `true` if `target` is a knight's jump away from `self`.
    pub fn is_knight_movement(self, target: Position) -> bool {
        match (self.column_distance(target).abs(), self.rank_distance(target).abs()) {
            (1, 2) | (2, 1) => true,
            _ => false,
        }
    }

    /// Unit file step toward `target`. Only meaningful for diagonal movement.
    pub fn diagonal_column_vector(self, target: Position) -> i8 {
        self.column_distance(target).signum()
    }

    /// Unit rank step toward `target`. Only meaningful for diagonal movement.
    pub fn diagonal_rank_vector(self, target: Position) -> i8 {
        self.rank_distance(target).signum()
    }

    /// Unit file step toward `target`, which is 0 for movement along a file. Only meaningful for
    /// cross movement.
    pub fn cross_column_vector(self, target: Position) -> i8 {
        self.column_distance(target).signum()
    }

    /// Unit rank step toward `target`, which is 0 for movement along a rank. Only meaningful for
    /// cross movement.
    pub fn cross_rank_vector(self, target: Position) -> i8 {
        self.rank_distance(target).signum()
    }

    /// The file component of the movement toward `target`: a unit step for diagonal or cross
    /// movement, otherwise the full signed distance.
    pub fn column_vector(self, target: Position) -> i8 {
        if self.is_diagonal_movement(target) {
            self.diagonal_column_vector(target)
        } else if self.is_cross_movement(target) {
            self.cross_column_vector(target)
        } else {
            self.column_distance(target)
        }
    }

    /// The rank component of the movement toward `target`: a unit step for diagonal or cross
    /// movement, otherwise the full signed distance.
    pub fn rank_vector(self, target: Position) -> i8 {
        if self.is_diagonal_movement(target) {
            self.diagonal_rank_vector(target)
        } else if self.is_cross_movement(target) {
            self.cross_rank_vector(target)
        } else {
            self.rank_distance(target)
        }
    }

    /// Returns the direction to walk from `self` to reach `target`, or `None` if `target` is not
    /// on the same rank, file or diagonal.
    pub fn direction_to(self, target: Position) -> Option<Direction> {
        if self.is_diagonal_movement(target) || self.is_cross_movement(target) {
            Direction::from_vector(self.column_vector(target), self.rank_vector(target))
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.file.to_string() + &self.rank.to_string()).fmt(f)
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let c: Vec<_> = s.chars().collect();
        if c.len() == 2 {
            match (c[0].to_string().parse(), c[1].to_string().parse()) {
                (Ok(file), Ok(rank)) => Ok(Position::new(file, rank)),
                _ => Err(Error::InvalidPosition(s.to_owned())),
            }
        } else {
            Err(Error::InvalidPosition(s.to_owned()))
        }
    }
}

impl Serialize for Position {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Iterator over the squares in one direction from a position. See `Position::ray`.
#[derive(Debug, Clone)]
pub struct Ray {
    next: Option<Position>,
    direction: Direction,
}

impl Iterator for Ray {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        let current = self.next?;
        self.next = current.step(self.direction).ok();

        Some(current)
    }
}

impl FusedIterator for Ray { }

////////////////////////////////////////////////////////////////////////////////////////////////////
mod piece;
pub use piece::{Kind, Piece};

mod board;
pub use board::Board;

pub mod game;
pub use game::{Game, GameStatus, Move};

pub mod error;
pub use error::{Error, IllegalMoveReason};

#[cfg(test)]
mod color_tests {
    use super::Color;
    use super::error::Error;

    #[test]
    fn not_gives_the_opponent() {
        assert_eq!(!Color::White, Color::Black);
        assert_eq!(!Color::Black, Color::White);
    }

    #[test]
    fn display_trait_works() {
        assert_eq!(format!("{}", Color::White), "white");
        assert_eq!(format!("{}", Color::Black), "black");
    }

    #[test]
    fn fromstr_trait_works() {
        assert_eq!("w".parse(), Ok(Color::White));
        assert_eq!("black".parse(), Ok(Color::Black));
        assert_eq!("W".parse::<Color>(), Err(Error::InvalidColor("W".to_owned())));
        assert!("".parse::<Color>().is_err());
    }

    #[test]
    fn default_is_white() {
        assert_eq!(Color::White, Default::default());
    }
}



#[cfg(test)]
mod direction_tests {
    use super::Direction;

    #[test]
    fn vectors_are_unit_steps() {
        for &d in Direction::ALL.iter() {
            assert!(d.column().abs() <= 1 && d.rank().abs() <= 1);
            assert!(d.column() != 0 || d.rank() != 0);
            assert_eq!(Direction::from_vector(d.column(), d.rank()), Some(d));
        }
    }

    #[test]
    fn diagonal_and_cross_partition_all() {
        for &d in Direction::DIAGONAL.iter() {
            assert!(d.is_diagonal());
        }
        for &d in Direction::CROSS.iter() {
            assert!(!d.is_diagonal());
        }
    }

    #[test]
    fn from_vector_rejects_non_unit_vectors() {
        assert_eq!(Direction::from_vector(0, 0), None);
        assert_eq!(Direction::from_vector(2, 1), None);
        assert_eq!(Direction::from_vector(1, -1), Some(Direction::SouthEast));
    }
}
