//! The board representation, shared by real play and by the search.
//!
//! The search mutates a single `Position` in place, placing a stone before descending and
//! removing it again before trying the next move. Every [`Position::place`] done while exploring
//! must be matched by exactly one [`Position::undo`].

use std::collections::BTreeSet;
use std::fmt;
use std::ops;
use std::sync::Arc;

use thiserror::Error;

pub use lines::{all_lines, has_line, Line};
pub use square::{Direction, Square};

pub mod lines;
mod square;

/// One of the two sides. The human (or remote) side maximizes the score, the computer minimizes it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Computer,
}

impl Side {
    pub const fn symbol(self) -> char {
        match self {
            Side::Player => 'X',
            Side::Computer => 'O',
        }
    }
}

impl ops::Not for Side {
    type Output = Side;

    fn not(self) -> Self::Output {
        match self {
            Side::Player => Side::Computer,
            Side::Computer => Side::Player,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player => write!(f, "player"),
            Side::Computer => write!(f, "computer"),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cell {
    #[default]
    Empty,
    Player,
    Computer,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Cell::Empty => None,
            Cell::Player => Some(Side::Player),
            Cell::Computer => Some(Side::Computer),
        }
    }
}

impl From<Side> for Cell {
    fn from(side: Side) -> Self {
        match side {
            Side::Player => Cell::Player,
            Side::Computer => Cell::Computer,
        }
    }
}

/// A move that cannot be played, coming from outside the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("square {0} is outside the board")]
    OutOfBounds(Square),
    #[error("square {0} is already occupied")]
    Occupied(Square),
    #[error("could not parse move \"{0}\"")]
    Malformed(String),
}

/// An N×N board, together with the set of squares played by each side.
/// The move sets always mirror the occupied cells exactly.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Position {
    size: usize,
    win_length: usize,
    cells: Box<[Cell]>,
    player_moves: BTreeSet<Square>,
    computer_moves: BTreeSet<Square>,
    lines: Arc<[Line]>,
}

impl Position {
    /// An empty `size`×`size` board, where `win_length` stones in a row wins.
    pub fn new(size: usize, win_length: usize) -> Self {
        assert!(size > 0, "Board size must be positive");
        assert!(win_length > 0, "Win length must be positive");
        Position {
            size,
            win_length,
            cells: vec![Cell::Empty; size * size].into_boxed_slice(),
            player_moves: BTreeSet::new(),
            computer_moves: BTreeSet::new(),
            lines: all_lines(size, win_length).into(),
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Every possible line of `win_length` squares on this board
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn moves(&self, side: Side) -> &BTreeSet<Square> {
        match side {
            Side::Player => &self.player_moves,
            Side::Computer => &self.computer_moves,
        }
    }

    fn moves_mut(&mut self, side: Side) -> &mut BTreeSet<Square> {
        match side {
            Side::Player => &mut self.player_moves,
            Side::Computer => &mut self.computer_moves,
        }
    }

    pub fn in_bounds(&self, square: Square) -> bool {
        square.row() < self.size && square.col() < self.size
    }

    /// Whether the square is on the board and unoccupied
    pub fn is_empty(&self, square: Square) -> bool {
        self.in_bounds(square) && self[square].is_empty()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.len() - self.player_moves.len() - self.computer_moves.len()
    }

    pub fn is_full(&self) -> bool {
        self.empty_count() == 0
    }

    pub fn empty_squares(&self) -> impl Iterator<Item = Square> + '_ {
        self.squares().filter(move |&square| self[square].is_empty())
    }

    /// All squares on the board, row-major
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Square::new(row, col)))
    }

    /// Place a stone for `side`.
    ///
    /// # Panics
    /// If the square is outside the board or already occupied. Moves from outside the engine
    /// should go through [`Position::try_place`].
    pub fn place(&mut self, side: Side, square: Square) {
        assert!(
            self.is_empty(square),
            "Tried to place {} on unavailable square {} of\n{}",
            side,
            square,
            self
        );
        self.cells[square.row() * self.size + square.col()] = side.into();
        self.moves_mut(side).insert(square);
    }

    pub fn try_place(&mut self, side: Side, square: Square) -> Result<(), MoveError> {
        if !self.in_bounds(square) {
            return Err(MoveError::OutOfBounds(square));
        }
        if !self[square].is_empty() {
            return Err(MoveError::Occupied(square));
        }
        self.place(side, square);
        Ok(())
    }

    /// Take back a stone previously placed by `side`.
    ///
    /// # Panics
    /// If `side` has no stone on the square.
    pub fn undo(&mut self, side: Side, square: Square) {
        assert!(
            self.moves_mut(side).remove(&square),
            "Tried to undo {} at {}, which it never played",
            side,
            square
        );
        self.cells[square.row() * self.size + square.col()] = Cell::Empty;
    }

    /// Whether `side` has a line through `last_move`
    pub fn has_line_through(&self, side: Side, last_move: Square) -> bool {
        has_line(self.moves(side), last_move, self.win_length)
    }
}

impl ops::Index<Square> for Position {
    type Output = Cell;

    fn index(&self, square: Square) -> &Self::Output {
        &self.cells[square.row() * self.size + square.col()]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.size) {
            for cell in row {
                let symbol = cell.side().map(Side::symbol).unwrap_or('-');
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
