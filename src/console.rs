//! A text console for playing a game at the terminal
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::io;
use std::io::{BufRead, Write};
use std::str::FromStr;
use lazy_static::lazy_static;
use log::{debug, trace};
use regex::{Regex, RegexSet};
use crate::chess::{Board, File, Game, Position, Rank};
use crate::store::{GameStore, InMemoryStore};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Commands accepted by the console
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Starts a new game, replacing any game in progress.
    ///
    /// ```text
    /// start
    /// ```
    Start,

    /// Leaves the console.
    ///
    /// ```text
    /// end
    /// ```
    End,

    /// Moves a piece.
    ///
    /// ```text
    /// move SOURCE TARGET
    /// ```
    ///
    /// SOURCE and TARGET are square labels such as `e2` and `e4`.
    Move(String, String),

    /// Lists the squares the piece on SQUARE can move to.
    ///
    /// ```text
    /// moves SQUARE
    /// ```
    Moves(String),

    /// Prints the board.
    Board,

    /// Prints whose turn it is, or who won.
    Status,

    /// Prints the list of commands.
    Help,
}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, UnknownCommand> {
        use Command::*;

        let s = s.trim();
        if let Some(ind) = COMMAND_SET.matches(s).iter().next() {
            let args = COMMAND_VEC[ind].captures(s).ok_or(UnknownCommand)?;
            let arg = |i| args.get(i).map(|m| m.as_str().to_owned()).ok_or(UnknownCommand);

            match ind {
                0 => Ok(Start),
                1 => Ok(End),
                2 => Ok(Move(arg(1)?, arg(2)?)),
                3 => Ok(Moves(arg(1)?)),
                4 => Ok(Board),
                5 => Ok(Status),
                6 => Ok(Help),
                _ => unreachable!(),
            }
        } else {
            Err(UnknownCommand)
        }
    }
}

const COMMANDS: [&str; 7] = [
    r"^start$",
    r"^(?:end|quit)$",
    r"^move\s+(\S+)\s+(\S+)$",
    r"^moves\s+(\S+)$",
    r"^board$",
    r"^status$",
    r"^(?:help|\?)$",
];

lazy_static! {
    static ref COMMAND_SET: RegexSet = RegexSet::new(&COMMANDS).expect("INFALLIBLE");
    static ref COMMAND_VEC: Vec<Regex> = {
        let mut cmd_vec = Vec::new();
        for cmd in &COMMANDS {
            cmd_vec.push(Regex::new(cmd).expect("INFALLIBLE"));
        }
        cmd_vec
    };
}

const HELP: &str = "\
commands:
  start               start a new game
  move SOURCE TARGET  move a piece, eg. move e2 e4
  moves SQUARE        list the squares a piece can move to
  board               show the board
  status              show whose turn it is
  end                 quit";

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Input that is not one of the console's commands
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct UnknownCommand;

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        "unknown command (type 'help' for a list of commands)".fmt(f)
    }
}

impl std::error::Error for UnknownCommand { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Reads commands from `input` and writes responses to `output`, keeping the game in a single
/// slot `InMemoryStore`.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
    store: InMemoryStore,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Creates a console with no game started
    pub fn new(input: R, output: W) -> Self {
        Console {
            input,
            output,
            store: InMemoryStore::new(),
        }
    }

    /// Returns the store holding the current game
    pub fn store(&self) -> &InMemoryStore {
        &self.store
    }

    /// Handles commands until `end` or the end of the input.
    ///
    /// # Errors
    ///
    /// Returns any error from reading the input or writing the output.
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", HELP)?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(());
            }

            let command = line.trim();
            trace!("<console>: {}", command);
            if command.is_empty() {
                continue;
            }

            match command.parse() {
                Ok(Command::End) => return Ok(()),
                Ok(command) => self.execute(command)?,
                Err(err) => writeln!(self.output, "{}", err)?,
            }
            self.output.flush()?;
        }
    }

    /// Carries out a single command.
    pub fn execute(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Start => {
                self.store.save(Game::new());
                self.show_board()
            },
            Command::End => Ok(()),
            Command::Move(source, target) => self.make_move(&source, &target),
            Command::Moves(square) => self.show_moves(&square),
            Command::Board => self.show_board(),
            Command::Status => self.show_status(),
            Command::Help => writeln!(self.output, "{}", HELP),
        }
    }

    fn make_move(&mut self, source: &str, target: &str) -> io::Result<()> {
        let mut game = match self.store.select() {
            Some(game) => game.clone(),
            None => return self.no_game(),
        };

        match game.make_move_from_str(source, target) {
            Ok(_) => {
                self.store.update(game);
                self.show_board()?;
                if let Some(game) = self.store.select().filter(|game| game.is_over()) {
                    writeln!(self.output, "game over: {}", game.status())?;
                }
                Ok(())
            },
            Err(err) => writeln!(self.output, "{}", err),
        }
    }

    fn show_moves(&mut self, square: &str) -> io::Result<()> {
        let game = match self.store.select() {
            Some(game) => game,
            None => return self.no_game(),
        };

        match square.parse::<Position>() {
            Ok(source) => {
                let targets: Vec<_> = game.movable_positions(source)
                    .iter()
                    .map(|p| p.to_string())
                    .collect();
                if targets.is_empty() {
                    writeln!(self.output, "{} cannot move", source)
                } else {
                    writeln!(self.output, "{}: {}", source, targets.join(" "))
                }
            },
            Err(err) => writeln!(self.output, "{}", err),
        }
    }

    fn show_board(&mut self) -> io::Result<()> {
        match self.store.select() {
            Some(game) => writeln!(self.output, "{}", render(game.board())),
            None => self.no_game(),
        }
    }

    fn show_status(&mut self) -> io::Result<()> {
        match self.store.select() {
            Some(game) if game.is_over() => writeln!(self.output, "{}", game.status()),
            Some(game) => writeln!(self.output, "{} to move", game.turn()),
            None => self.no_game(),
        }
    }

    fn no_game(&mut self) -> io::Result<()> {
        debug!("no game in progress");
        writeln!(self.output, "no game in progress (type 'start' to begin)")
    }
}

/// Draws the board with rank numbers down the right and file letters along the bottom.
fn render(board: &Board) -> String {
    let mut s = String::new();

    for (line, rank) in board.to_string().lines().zip(Rank::ALL.iter().rev()) {
        s += &format!("{}  {}\n", line, rank);
    }
    s.push('\n');
    for file in File::ALL.iter() {
        s += &file.to_string();
    }

    s
}
