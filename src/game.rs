//! A game between the engine and an outside opponent.

use std::fmt;
use std::io::{self, BufRead, Write};

use log::debug;

use crate::position::{MoveError, Position, Side, Square};
use crate::search::{self, SearchSettings};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    PlayerWin,
    ComputerWin,
    Draw,
}

impl Outcome {
    pub fn win_for(side: Side) -> Self {
        match side {
            Side::Player => Outcome::PlayerWin,
            Side::Computer => Outcome::ComputerWin,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::PlayerWin => write!(f, "Player wins!"),
            Outcome::ComputerWin => write!(f, "Computer wins!"),
            Outcome::Draw => write!(f, "Game ends in a draw"),
        }
    }
}

/// The board of a game in progress, and the settings the engine searches with.
#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    settings: SearchSettings,
}

impl Game {
    pub fn new(size: usize, win_length: usize, settings: SearchSettings) -> Self {
        Game {
            position: Position::new(size, win_length),
            settings,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// The result of the game, if `side` just ended it by playing `last_move`
    pub fn outcome_after(&self, side: Side, last_move: Square) -> Option<Outcome> {
        if self.position.has_line_through(side, last_move) {
            Some(Outcome::win_for(side))
        } else if self.position.is_full() {
            Some(Outcome::Draw)
        } else {
            None
        }
    }

    /// Play a move that did not come from the engine
    pub fn play_move(&mut self, side: Side, square: Square) -> Result<Option<Outcome>, MoveError> {
        self.position.try_place(side, square)?;
        Ok(self.outcome_after(side, square))
    }

    /// Search for the computer's move and play it. Returns `None` if the board is already full.
    pub fn play_computer_move(&mut self) -> Option<(Square, Option<Outcome>)> {
        let (mv, _score) =
            search::play_best_move(&mut self.position, Side::Computer, &self.settings)?;
        Some((mv, self.outcome_after(Side::Computer, mv)))
    }

    fn computer_turn(&mut self) -> Option<Outcome> {
        match self.play_computer_move() {
            Some((_, outcome)) => outcome,
            None => Some(Outcome::Draw),
        }
    }

    /// Play against a human reading moves from `input`, until the game is decided.
    /// The human moves first unless `computer_first` is set.
    pub fn play_human_vs_computer<R: BufRead, W: Write>(
        &mut self,
        mut input: R,
        mut output: W,
        computer_first: bool,
    ) -> io::Result<Outcome> {
        let mut side_to_move = if computer_first {
            Side::Computer
        } else {
            Side::Player
        };
        let outcome = loop {
            let outcome = match side_to_move {
                Side::Computer => self.computer_turn(),
                Side::Player => {
                    write!(output, "{}", self.position)?;
                    let mv = self.read_human_move(&mut input, &mut output)?;
                    self.outcome_after(Side::Player, mv)
                }
            };
            if let Some(outcome) = outcome {
                break outcome;
            }
            side_to_move = !side_to_move;
        };

        writeln!(output, "{}", outcome)?;
        writeln!(
            output,
            "Computer moves: {}",
            format_moves(&self.position, Side::Computer)
        )?;
        writeln!(
            output,
            "Player moves: {}",
            format_moves(&self.position, Side::Player)
        )?;
        write!(output, "{}", self.position)?;
        output.flush()?;
        Ok(outcome)
    }

    /// Prompt until the human enters a legal move, and play it
    fn read_human_move<R: BufRead, W: Write>(
        &mut self,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<Square> {
        let mut line = String::new();
        loop {
            write!(output, "Enter row, col coordinates:")?;
            output.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "Input ended before the game was over",
                ));
            }
            let placed = Square::parse_console(&line)
                .and_then(|mv| self.position.try_place(Side::Player, mv).map(|()| mv));
            match placed {
                Ok(mv) => return Ok(mv),
                Err(err) => debug!("Rejected human move: {}", err),
            }
        }
    }
}

pub fn format_moves(position: &Position, side: Side) -> String {
    position
        .moves(side)
        .iter()
        .map(|mv| format!("({})", mv))
        .collect::<Vec<_>>()
        .join(" ")
}
