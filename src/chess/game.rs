//! Module to implement a chess game
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::str::FromStr;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move from one square to another
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The square the piece moves from
    pub source: Position,
    /// The square the piece moves to
    pub target: Position,
}

impl Move {
    /// Creates a move from `source` to `target`
    pub fn new(source: Position, target: Position) -> Move {
        Move { source, target }
    }
}

impl fmt::Display for Move {
    /// Formats the move in coordinate notation (eg e2e4)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        (self.source.to_string() + &self.target.to_string()).fmt(f)
    }
}

impl FromStr for Move {
    type Err = Error;

    /// Parses coordinate notation, with or without a space between the squares (eg "e2e4" or
    /// "e2 e4").
    fn from_str(s: &str) -> Result<Move> {
        let mut squares = s.split_whitespace();

        let (source, target) = match (squares.next(), squares.next(), squares.next()) {
            (Some(source), Some(target), None) => (source, target),
            (Some(both), None, None) => match (both.get(..2), both.get(2..)) {
                (Some(source), Some(target)) => (source, target),
                _ => return Err(Error::InvalidPosition(both.to_owned())),
            },
            _ => return Err(Error::InvalidPosition(s.to_owned())),
        };

        Ok(Move::new(source.parse()?, target.parse()?))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The state of a game
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are still being made
    InProgress,
    /// White has won by capturing the black king, or black was left without a move.
    WhiteWins,
    /// Black has won by capturing the white king, or white was left without a move.
    BlackWins,
}

impl GameStatus {
    /// The status for a game won by `color`
    pub fn won_by(color: Color) -> GameStatus {
        match color {
            Color::White => GameStatus::WhiteWins,
            Color::Black => GameStatus::BlackWins,
        }
    }

    /// Returns `true` once the game has a winner.
    pub fn is_over(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Returns the winning color, if any.
    pub fn winner(self) -> Option<Color> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::WhiteWins => Some(Color::White),
            GameStatus::BlackWins => Some(Color::Black),
        }
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        GameStatus::InProgress
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => "in progress",
            GameStatus::WhiteWins => "white wins",
            GameStatus::BlackWins => "black wins",
        }.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A chess game: the board, whose turn it is, and whether anyone has won yet.
///
/// Moves are validated completely before anything changes, so a rejected move leaves the game
/// exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    board: Board,
    turn: Color,
    status: GameStatus,
    history: Vec<Move>,
}

impl Game {
    /// Creates a new game from the standard starting position, with white to move.
    pub fn new() -> Self {
        Game::starting_at(Board::new(), Color::White)
    }

    /// Creates a new game from `board`, with `turn` to move.
    pub fn starting_at(board: Board, turn: Color) -> Self {
        Game {
            board,
            turn,
            status: GameStatus::InProgress,
            history: Vec::new(),
        }
    }

    /// Returns the current board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the color to move next
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the game's status
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns `true` once the game has a winner.
    pub fn is_over(&self) -> bool {
        self.status.is_over()
    }

    /// Returns the moves made so far, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Moves the piece on `source` to `target`.
    ///
    /// # Errors
    ///
    /// - `Error::GameOver` if the game already has a winner.
    /// - `Error::IllegalMove` if `source` is empty or the board rejects the move.
    /// - `Error::NotYourTurn` if the piece on `source` belongs to the player not on move.
    ///
    /// The game is unchanged when an error is returned.
    pub fn make_move(&mut self, source: Position, target: Position) -> Result<&mut Self> {
        let captured = match self.try_move(source, target) {
            Ok(captured) => captured,
            Err(error) => {
                debug!("rejected move {}{}: {}", source, target, error);
                return Err(error);
            },
        };

        let mover = self.turn;
        self.history.push(Move::new(source, target));
        self.turn = !mover;
        info!("{} played {}{}", mover, source, target);

        if let Some(Piece::King(_)) = captured {
            self.status = GameStatus::won_by(mover);
            info!("{} king captured: {}", self.turn, self.status);
        } else if !self.board.has_movable_piece(self.turn) {
            self.status = GameStatus::won_by(mover);
            info!("{} has no legal move: {}", self.turn, self.status);
        }

        Ok(self)
    }

    /// Makes the move given by two square labels, such as "e2" and "e4".
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidPosition` if either label is malformed, otherwise the same errors as
    /// `make_move`.
    pub fn make_move_from_str(&mut self, source: &str, target: &str) -> Result<&mut Self> {
        let source = source.parse()?;
        let target = target.parse()?;

        self.make_move(source, target)
    }

    /// Makes the given move
    pub fn play(&mut self, mv: Move) -> Result<&mut Self> {
        self.make_move(mv.source, mv.target)
    }

    /// Returns the squares the piece on `source` may move to. The list is empty if the game is
    /// over or the piece does not belong to the player on move.
    pub fn movable_positions(&self, source: Position) -> Vec<Position> {
        if self.is_over() || !self.board.piece_at(source).is_color(self.turn) {
            Vec::new()
        } else {
            self.board.movable_positions(source)
        }
    }

    fn try_move(&mut self, source: Position, target: Position) -> Result<Option<Piece>> {
        if self.is_over() {
            return Err(Error::GameOver(self.status));
        }

        match self.board.piece_at(source).color() {
            None => return Err(IllegalMoveReason::EmptySource.into()),
            Some(color) if color != self.turn => return Err(Error::NotYourTurn(self.turn)),
            Some(_) => { },
        }

        self.board.apply_move(source, target).map_err(|error| match error {
            Error::OutOfBounds => IllegalMoveReason::Unreachable.into(),
            error => error,
        })
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}


#[cfg(test)]
mod game_tests {
    use super::*;

    fn pos(s: &str) -> Position {
        s.parse().unwrap()
    }

    #[test]
    fn new_game_starts_with_white() {
        let game = Game::new();
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.board(), &Board::new());
        assert!(game.history().is_empty());
        assert_eq!(Game::default(), game);
    }

    #[test]
    fn turns_alternate() {
        let mut game = Game::new();
        game.make_move_from_str("e2", "e4").unwrap()
            .make_move_from_str("e7", "e5").unwrap()
            .make_move_from_str("g1", "f3").unwrap();
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.history().len(), 3);
        assert_eq!(game.history()[2].to_string(), "g1f3");
        assert_eq!(game.board().piece_at(pos("f3")), Piece::Knight(Color::White));
    }

    #[test]
    fn moving_out_of_turn_is_rejected() {
        let mut game = Game::new();
        let before = game.clone();
        assert_eq!(game.make_move_from_str("e7", "e5").err(),
                   Some(Error::NotYourTurn(Color::White)));
        assert_eq!(game, before);

        game.make_move_from_str("e2", "e4").unwrap();
        assert_eq!(game.make_move_from_str("d2", "d4").err(),
                   Some(Error::NotYourTurn(Color::Black)));
    }

    #[test]
    fn illegal_moves_are_rejected_without_changes() {
        use IllegalMoveReason::*;

        let mut game = Game::new();
        let before = game.board().snapshot();
        assert_eq!(game.make_move_from_str("e4", "e5").err(), Some(Error::IllegalMove(EmptySource)));
        assert_eq!(game.make_move_from_str("c1", "e3").err(), Some(Error::IllegalMove(Blocked)));
        assert_eq!(game.make_move_from_str("d1", "d2").err(),
                   Some(Error::IllegalMove(SameColorTarget)));
        assert_eq!(game.make_move_from_str("g1", "g3").err(), Some(Error::IllegalMove(Unreachable)));
        assert_eq!(game.board().snapshot(), before);
        assert_eq!(game.turn(), Color::White);
        assert!(game.history().is_empty());
    }

    #[test]
    fn malformed_labels_are_rejected_first() {
        let mut game = Game::new();
        assert_eq!(game.make_move_from_str("e9", "e4").err(),
                   Some(Error::InvalidPosition("e9".to_owned())));
        assert_eq!(game.make_move_from_str("e2", "x4").err(),
                   Some(Error::InvalidPosition("x4".to_owned())));
        assert_eq!(game.make_move_from_str("E2", "e4").err(),
                   Some(Error::InvalidPosition("E2".to_owned())));
        assert_eq!(game.make_move_from_str("e2", "E4").err(),
                   Some(Error::InvalidPosition("E4".to_owned())));
        assert_eq!(game, Game::new());
    }

    #[test]
    fn capturing_the_king_ends_the_game() {
        let board: Board = "
            ....K...
            ........
            ........
            ........
            ........
            ........
            ....r...
            ....k..."
            .parse()
            .unwrap();
        let mut game = Game::starting_at(board, Color::White);
        game.make_move_from_str("e2", "e8").unwrap();
        assert_eq!(game.status(), GameStatus::WhiteWins);
        assert_eq!(game.status().winner(), Some(Color::White));
        assert!(game.is_over());

        let before = game.clone();
        assert_eq!(game.make_move_from_str("e8", "e7").err(),
                   Some(Error::GameOver(GameStatus::WhiteWins)));
        assert_eq!(game, before);
    }

    #[test]
    fn black_can_win_too() {
        let board: Board = "
            ....K...
            ........
            ........
            ........
            ........
            .....B..
            ........
            ...k...."
            .parse()
            .unwrap();
        let mut game = Game::starting_at(board, Color::Black);
        game.make_move_from_str("f3", "d1").unwrap();
        assert_eq!(game.status(), GameStatus::BlackWins);
    }

    #[test]
    fn side_left_without_a_move_loses() {
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
        let mut game = Game::starting_at(board, Color::White);
        game.make_move_from_str("e1", "e2").unwrap();
        assert_eq!(game.status(), GameStatus::WhiteWins);
    }

    #[test]
    fn movable_positions_respect_the_turn() {
        let game = Game::new();
        assert_eq!(game.movable_positions(pos("g1")), vec![pos("f3"), pos("h3")]);
        assert!(game.movable_positions(pos("g8")).is_empty());
        assert!(game.movable_positions(pos("e4")).is_empty());
    }

    #[test]
    fn play_accepts_a_move() {
        let mut game = Game::new();
        game.play("b1c3".parse().unwrap()).unwrap();
        assert_eq!(game.board().piece_at(pos("c3")), Piece::Knight(Color::White));
    }

    #[test]
    fn status_display() {
        assert_eq!(GameStatus::InProgress.to_string(), "in progress");
        assert_eq!(GameStatus::won_by(Color::Black).to_string(), "black wins");
        assert_eq!(GameStatus::InProgress.winner(), None);
    }

    #[test]
    fn yaml_round_trip() {
        let mut game = Game::new();
        game.make_move_from_str("d2", "d4").unwrap()
            .make_move_from_str("d7", "d5").unwrap();
        let yaml = serde_yaml::to_string(&game).unwrap();
        assert_eq!(serde_yaml::from_str::<Game>(&yaml).unwrap(), game);
    }
}
