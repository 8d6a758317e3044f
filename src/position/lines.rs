//! Lines of `win_length` squares, and detection of completed lines.

use std::collections::BTreeSet;

use super::square::{Direction, Square};

/// A contiguous run of squares in one of the four orientations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Line {
    start: Square,
    direction: Direction,
    len: usize,
}

impl Line {
    pub fn start(self) -> Square {
        self.start
    }

    pub fn direction(self) -> Direction {
        self.direction
    }

    pub fn squares(self) -> impl Iterator<Item = Square> {
        (0..self.len as isize).filter_map(move |step| self.start.jump(self.direction, step))
    }
}

/// Every line of `win_length` squares that fits on a `size`×`size` board, regardless of what is on the board.
/// Empty if `win_length` is larger than the board.
pub fn all_lines(size: usize, win_length: usize) -> Vec<Line> {
    let mut lines = vec![];
    if win_length > size || win_length == 0 {
        return lines;
    }
    // Number of starting offsets along an axis
    let span = size - win_length + 1;
    let line = |row, col, direction| Line {
        start: Square::new(row, col),
        direction,
        len: win_length,
    };

    for row in 0..size {
        for col in 0..span {
            lines.push(line(row, col, Direction::Horizontal));
        }
    }
    for col in 0..size {
        for row in 0..span {
            lines.push(line(row, col, Direction::Vertical));
        }
    }
    for row in 0..span {
        for col in 0..span {
            lines.push(line(row, col, Direction::Diagonal));
        }
    }
    for row in 0..span {
        for col in win_length - 1..size {
            lines.push(line(row, col, Direction::AntiDiagonal));
        }
    }
    lines
}

/// Check whether `last_move` completed a line of at least `win_length` squares from `moves`.
///
/// Only lines through `last_move` are considered, so `moves` must be the move set of the side that played it.
pub fn has_line(moves: &BTreeSet<Square>, last_move: Square, win_length: usize) -> bool {
    let reach = win_length.saturating_sub(1) as isize;
    Direction::ALL.iter().any(|&direction| {
        let run_length = |sign: isize| {
            (1..=reach)
                .map_while(|step| last_move.jump(direction, sign * step))
                .take_while(|square| moves.contains(square))
                .count()
        };
        1 + run_length(1) + run_length(-1) >= win_length
    })
}
