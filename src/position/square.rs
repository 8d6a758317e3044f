use std::fmt;
use std::str::FromStr;

use crate::position::MoveError;

/// A location on the board, as a (row, column) pair. Can be used to index a `Position`.
///
/// Squares are ordered row-major, which is also the iteration order of a side's move set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square {
    row: usize,
    col: usize,
}

impl Square {
    pub const fn new(row: usize, col: usize) -> Self {
        Square { row, col }
    }

    pub const fn row(self) -> usize {
        self.row
    }

    pub const fn col(self) -> usize {
        self.col
    }

    /// Move `steps` times in the given direction. Negative steps go the opposite way.
    /// Returns `None` if the result would have a negative coordinate.
    /// The result is not checked against the board size.
    pub fn jump(self, direction: Direction, steps: isize) -> Option<Self> {
        let (d_row, d_col) = direction.delta();
        Some(Square {
            row: self.row.checked_add_signed(d_row * steps)?,
            col: self.col.checked_add_signed(d_col * steps)?,
        })
    }

    /// All squares within Chebyshev distance `radius` of this square, clamped to a `size`×`size` board,
    /// in row-major order. Includes the square itself.
    pub fn neighbourhood(self, radius: usize, size: usize) -> impl Iterator<Item = Square> {
        let start_row = self.row.saturating_sub(radius);
        let end_row = (self.row + radius).min(size - 1);
        let start_col = self.col.saturating_sub(radius);
        let end_col = (self.col + radius).min(size - 1);
        (start_row..=end_row)
            .flat_map(move |row| (start_col..=end_col).map(move |col| Square::new(row, col)))
    }

    /// Parse the console format, two whitespace-separated integers such as `1 2`.
    pub fn parse_console(input: &str) -> Result<Self, MoveError> {
        let mut words = input.split_whitespace();
        match (words.next(), words.next(), words.next()) {
            (Some(row), Some(col), None) => Ok(Square::new(
                parse_coordinate(row, input)?,
                parse_coordinate(col, input)?,
            )),
            _ => Err(MoveError::Malformed(input.trim().to_string())),
        }
    }
}

fn parse_coordinate(word: &str, input: &str) -> Result<usize, MoveError> {
    usize::from_str(word.trim()).map_err(|_| MoveError::Malformed(input.trim().to_string()))
}

/// The wire format used by the move relay: `<row>,<col>`
impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

impl FromStr for Square {
    type Err = MoveError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let Some((row, col)) = input.trim().split_once(',') else {
            return Err(MoveError::Malformed(input.to_string()));
        };
        Ok(Square::new(
            parse_coordinate(row, input)?,
            parse_coordinate(col, input)?,
        ))
    }
}

/// The four orientations a line can have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Horizontal,
    Vertical,
    Diagonal,
    AntiDiagonal,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// (row, column) offset of one step in this direction
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}
