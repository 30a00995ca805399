//! Contains the `Board`, which maps every square to its occupant
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::BTreeMap;
use std::convert::TryFrom;
use std::fmt;
use std::mem;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use super::*;

use Color::*;

/// Back rank pieces from the a-file to the h-file
const BACK_RANK: [Kind; File::COUNT] = [
    Kind::Rook, Kind::Knight, Kind::Bishop, Kind::Queen,
    Kind::King, Kind::Bishop, Kind::Knight, Kind::Rook,
];

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The arrangement of pieces on the board. Every square holds exactly one `Piece`, which is
/// `Piece::Empty` when the square is unoccupied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Position, Piece>", into = "BTreeMap<Position, Piece>")]
pub struct Board {
    squares: [Piece; Position::COUNT],
}

impl Board {
    /// Returns the standard starting arrangement
    pub fn new() -> Board {
        let mut board = Board::empty();

        for (&file, &kind) in File::ALL.iter().zip(BACK_RANK.iter()) {
            board.place(Position::new(file, Rank::R1), Piece::new(White, kind));
            board.place(Position::new(file, Rank::R2), Piece::Pawn(White));
            board.place(Position::new(file, Rank::R7), Piece::Pawn(Black));
            board.place(Position::new(file, Rank::R8), Piece::new(Black, kind));
        }

        board
    }

    /// Returns a board with no pieces on it
    pub fn empty() -> Board {
        Board {
            squares: [Piece::Empty; Position::COUNT],
        }
    }

    /// Puts `piece` on `position`, replacing whatever was there.
    pub fn place(&mut self, position: Position, piece: Piece) -> &mut Self {
        self.squares[position.index()] = piece;
        self
    }

    /// Returns the occupant of `position`
    pub fn piece_at(&self, position: Position) -> Piece {
        self.squares[position.index()]
    }

    /// Returns `true` if no piece stands strictly between `source` and `target`.
    ///
    /// Only moves along a rank, file or diagonal have a path; any other move is considered clear.
    pub fn is_path_clear(&self, source: Position, target: Position) -> bool {
        match source.direction_to(target) {
            Some(direction) => {
                source.ray(direction)
                    .take_while(|&p| p != target)
                    .all(|p| self.piece_at(p).is_empty())
            },
            None => true,
        }
    }

    /// Checks whether the piece on `source` may move to `target`, without changing the board.
    ///
    /// # Errors
    ///
    /// Returns `Error::IllegalMove` with the reason the move was rejected.
    pub fn check_move(&self, source: Position, target: Position) -> Result<()> {
        use IllegalMoveReason::*;

        let piece = self.piece_at(source);
        let color = piece.color().ok_or(Error::IllegalMove(EmptySource))?;

        if !piece.reaches(source, target, self) {
            Err(Unreachable.into())
        } else if self.piece_at(target).is_color(color) {
            Err(SameColorTarget.into())
        } else if piece.is_sliding() && !self.is_path_clear(source, target) {
            Err(Blocked.into())
        } else {
            Ok(())
        }
    }

    /// Moves the piece on `source` to `target` and returns the captured piece, if any.
    ///
    /// # Errors
    ///
    /// Returns the error from `check_move`, in which case the board is unchanged.
    pub fn apply_move(&mut self, source: Position, target: Position) -> Result<Option<Piece>> {
        self.check_move(source, target)?;

        let piece = mem::replace(&mut self.squares[source.index()], Piece::Empty);
        let captured = mem::replace(&mut self.squares[target.index()], piece);

        if captured.is_empty() {
            Ok(None)
        } else {
            Ok(Some(captured))
        }
    }

    /// Returns every square the piece on `source` may move to, in square order.
    pub fn movable_positions(&self, source: Position) -> Vec<Position> {
        let piece = self.piece_at(source);
        let directions: &[Direction] = match piece {
            Piece::Queen(_) => &Direction::ALL,
            Piece::Rook(_) => &Direction::CROSS,
            Piece::Bishop(_) => &Direction::DIAGONAL,
            _ => {
                return Position::all()
                    .filter(|&target| self.check_move(source, target).is_ok())
                    .collect();
            },
        };

        let mut targets = Vec::new();
        for &direction in directions {
            for target in source.ray(direction) {
                let occupant = self.piece_at(target);
                if occupant.color() != piece.color() {
                    targets.push(target);
                }
                if !occupant.is_empty() {
                    break;
                }
            }
        }
        targets.sort();

        targets
    }

    /// Returns `true` if any piece of `color` has somewhere to move.
    pub fn has_movable_piece(&self, color: Color) -> bool {
        self.pieces(color).any(|(position, _)| !self.movable_positions(position).is_empty())
    }

    /// Returns an iterator over the pieces of `color` and where they stand.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all()
            .map(move |p| (p, self.piece_at(p)))
            .filter(move |&(_, piece)| piece.is_color(color))
    }

    /// Returns the number of kings of `color` on the board.
    pub fn king_count(&self, color: Color) -> usize {
        self.pieces(color).filter(|&(_, piece)| piece == Piece::King(color)).count()
    }

    /// Returns a copy of the full mapping from square to occupant.
    pub fn snapshot(&self) -> BTreeMap<Position, Piece> {
        Position::all().map(|p| (p, self.piece_at(p))).collect()
    }

    /// Returns the mapping used for display: each square's label maps to the glyph of its
    /// occupant, or to an empty string for an empty square.
    pub fn labels(&self) -> BTreeMap<String, String> {
        Position::all()
            .map(|p| {
                let piece = self.piece_at(p);
                let glyph = if piece.is_empty() { String::new() } else { piece.to_string() };
                (p.to_string(), glyph)
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl fmt::Display for Board {
    /// Draws the board as eight lines of glyphs, rank 8 first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = String::new();

        for &rank in Rank::ALL.iter().rev() {
            for &file in File::ALL.iter() {
                s.push(self.piece_at(Position::new(file, rank)).glyph());
            }
            s.push('\n');
        }
        s.pop();

        s.fmt(f)
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parses the format written by `Display`. Leading and trailing whitespace on each line, and
    /// blank lines, are ignored.
    fn from_str(s: &str) -> Result<Board> {
        let lines: Vec<_> = s.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if lines.len() != Rank::COUNT {
            return Err(Error::InvalidBoard);
        }

        let mut board = Board::empty();
        for (line, &rank) in lines.iter().zip(Rank::ALL.iter().rev()) {
            let glyphs: Vec<_> = line.chars().collect();
            if glyphs.len() != File::COUNT {
                return Err(Error::InvalidBoard);
            }
            for (&glyph, &file) in glyphs.iter().zip(File::ALL.iter()) {
                let piece = Piece::from_glyph(glyph).ok_or(Error::InvalidBoard)?;
                board.place(Position::new(file, rank), piece);
            }
        }

        Ok(board)
    }
}

impl TryFrom<BTreeMap<Position, Piece>> for Board {
    type Error = Error;

    fn try_from(map: BTreeMap<Position, Piece>) -> Result<Self> {
        if map.len() != Position::COUNT {
            return Err(Error::InvalidBoard);
        }

        let mut board = Board::empty();
        for (position, piece) in map {
            board.place(position, piece);
        }

        Ok(board)
    }
}

impl From<Board> for BTreeMap<Position, Piece> {
    fn from(board: Board) -> Self {
        board.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    fn positions(list: &[&str]) -> Vec<Position> {
        list.iter().map(|s| pos(s)).collect()
    }

    #[test]
    fn new_board_has_the_standard_layout() {
        let board = Board::new();
        assert_eq!(board.to_string(), "RNBQKBNR\n\
                                       PPPPPPPP\n\
                                       ........\n\
                                       ........\n\
                                       ........\n\
                                       ........\n\
                                       pppppppp\n\
                                       rnbqkbnr");
        assert_eq!(board.piece_at(pos("e1")), Piece::King(White));
        assert_eq!(board.piece_at(pos("d8")), Piece::Queen(Black));
        assert_eq!(board.piece_at(pos("e4")), Piece::Empty);
        assert_eq!(board.pieces(White).count(), 16);
        assert_eq!(board.pieces(Black).count(), 16);
        assert_eq!(board.king_count(White), 1);
        assert_eq!(board.king_count(Black), 1);
    }

    #[test]
    fn display_and_fromstr_traits_match() {
        let board = Board::new();
        assert_eq!(board.to_string().parse::<Board>().unwrap(), board);
        assert_eq!(Board::empty().to_string().parse::<Board>().unwrap(), Board::empty());
    }

    #[test]
    fn fromstr_rejects_malformed_diagrams() {
        assert_eq!("".parse::<Board>(), Err(Error::InvalidBoard));
        assert!("........\n".repeat(7).parse::<Board>().is_err());
        assert!("........\n".repeat(9).parse::<Board>().is_err());
        assert!(".......\n".repeat(8).parse::<Board>().is_err());
        assert!("x.......\n".repeat(8).parse::<Board>().is_err());
    }

    #[test]
    fn snapshot_covers_every_square() {
        let snapshot = Board::new().snapshot();
        assert_eq!(snapshot.len(), Position::COUNT);
        assert_eq!(snapshot[&pos("a1")], Piece::Rook(White));
        assert_eq!(snapshot[&pos("a5")], Piece::Empty);
    }

    #[test]
    fn labels_leave_empty_squares_blank() {
        let labels = Board::new().labels();
        assert_eq!(labels.len(), Position::COUNT);
        assert_eq!(labels["a1"], "r");
        assert_eq!(labels["e8"], "K");
        assert_eq!(labels["e4"], "");
    }

    #[test]
    fn path_check_excludes_both_ends() {
        let board = Board::new();
        assert!(!board.is_path_clear(pos("c1"), pos("e3")));
        assert!(board.is_path_clear(pos("c1"), pos("d2")));
        assert!(!board.is_path_clear(pos("a1"), pos("a7")));
        assert!(board.is_path_clear(pos("a2"), pos("a7")));
        // a knight's move has no path
        assert!(board.is_path_clear(pos("b1"), pos("c3")));
    }

    #[test]
    fn check_move_reports_the_reason() {
        use IllegalMoveReason::*;

        let board = Board::new();
        assert_eq!(board.check_move(pos("e4"), pos("e5")), Err(Error::IllegalMove(EmptySource)));
        assert_eq!(board.check_move(pos("e2"), pos("e5")), Err(Error::IllegalMove(Unreachable)));
        assert_eq!(board.check_move(pos("a1"), pos("a2")), Err(Error::IllegalMove(SameColorTarget)));
        assert_eq!(board.check_move(pos("a1"), pos("a4")), Err(Error::IllegalMove(Blocked)));
        assert_eq!(board.check_move(pos("e2"), pos("e2")), Err(Error::IllegalMove(Unreachable)));
        assert_eq!(board.check_move(pos("g1"), pos("f3")), Ok(()));
    }

    #[test]
    fn apply_move_relocates_the_piece() {
        let mut board = Board::new();
        assert_eq!(board.apply_move(pos("e2"), pos("e4")), Ok(None));
        assert_eq!(board.piece_at(pos("e2")), Piece::Empty);
        assert_eq!(board.piece_at(pos("e4")), Piece::Pawn(White));
    }

    #[test]
    fn apply_move_returns_the_capture() {
        let mut board: Board = "
            ....K...
            ........
            ........
            ...P....
            ........
            ........
            ........
            ...qk..."
            .parse()
            .unwrap();
        assert_eq!(board.apply_move(pos("d1"), pos("d5")), Ok(Some(Piece::Pawn(Black))));
        assert_eq!(board.pieces(Black).count(), 1);
        assert_eq!(board.apply_move(pos("d5"), pos("e8")),
                   Err(Error::IllegalMove(IllegalMoveReason::Unreachable)));
    }

    #[test]
    fn rejected_move_leaves_the_board_unchanged() {
        let mut board = Board::new();
        let before = board.snapshot();
        assert!(board.apply_move(pos("f1"), pos("c4")).is_err());
        assert!(board.apply_move(pos("b1"), pos("d2")).is_err());
        assert!(board.apply_move(pos("c5"), pos("c6")).is_err());
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn movable_positions_at_the_start() {
        let board = Board::new();
        assert_eq!(board.movable_positions(pos("b1")), positions(&["a3", "c3"]));
        assert_eq!(board.movable_positions(pos("e2")), positions(&["e3", "e4"]));
        assert_eq!(board.movable_positions(pos("g8")), positions(&["f6", "h6"]));
        assert!(board.movable_positions(pos("a1")).is_empty());
        assert!(board.movable_positions(pos("d1")).is_empty());
        assert!(board.movable_positions(pos("e4")).is_empty());
    }

    #[test]
    fn movable_positions_stop_at_the_first_piece() {
        let board: Board = "
            ........
            ........
            ...P....
            ........
            .p.r..P.
            ........
            ........
            ........"
            .parse()
            .unwrap();
        assert_eq!(
            board.movable_positions(pos("d4")),
            positions(&["d1", "d2", "d3", "c4", "e4", "f4", "g4", "d5", "d6"])
        );
    }

    #[test]
    fn movable_positions_agree_with_check_move() {
        let mut board = Board::new();
        board.apply_move(pos("e2"), pos("e4")).unwrap();
        board.apply_move(pos("d7"), pos("d5")).unwrap();
        for source in Position::all() {
            let expected: Vec<_> = Position::all()
                .filter(|&target| board.check_move(source, target).is_ok())
                .collect();
            assert_eq!(board.movable_positions(source), expected, "from {}", source);
        }
    }

    #[test]
    fn a_side_without_moves_is_detected() {
        let board: Board = "
            ........
            ........
            ........
            P.......
            p.......
            ........
            ........
            ....k..."
            .parse()
            .unwrap();
        assert!(!board.has_movable_piece(Black));
        assert!(board.has_movable_piece(White));
        assert!(Board::new().has_movable_piece(Black));
    }

    #[test]
    fn yaml_round_trip() {
        let mut board = Board::new();
        board.apply_move(pos("g1"), pos("f3")).unwrap();
        let yaml = serde_yaml::to_string(&board).unwrap();
        assert_eq!(serde_yaml::from_str::<Board>(&yaml).unwrap(), board);
    }

    #[test]
    fn deserializing_a_partial_board_fails() {
        let yaml = "a1: Empty\nb1:\n  Rook: White\n";
        assert!(serde_yaml::from_str::<Board>(yaml).is_err());
    }
}
