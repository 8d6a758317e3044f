//! Heuristic evaluation of positions where the search has run out of depth.

use crate::position::{Cell, Position, Side};

/// Score type for the search. Positive scores favour the player, negative scores the computer.
pub type Score = i64;

/// Value of a win for every ply left before the depth limit.
pub const MAX_VALUE: Score = 1_000_000_000;

/// Score of a win for `side` with `plies_left` plies remaining before the depth limit.
/// Quicker wins score higher, and a win exactly at the depth limit scores 0.
pub fn win_score(side: Side, plies_left: u16) -> Score {
    let magnitude = MAX_VALUE * plies_left as Score;
    match side {
        Side::Player => magnitude,
        Side::Computer => -magnitude,
    }
}

/// Static evaluation of the position, summing the potential of every line on the board.
///
/// A line containing stones from only one side is worth `10^n` to that side, where `n` is its number of stones.
/// Lines blocked by both sides are worth nothing. A completed line decides the evaluation by itself,
/// scored like a win found with `plies_left` plies remaining.
pub fn static_eval(position: &Position, plies_left: u16) -> Score {
    let win_length = position.win_length();
    let mut score: Score = 0;

    for line in position.lines() {
        let mut player_count = 0;
        let mut computer_count = 0;
        for square in line.squares() {
            match position[square] {
                Cell::Player => player_count += 1,
                Cell::Computer => computer_count += 1,
                Cell::Empty => (),
            }
        }

        if computer_count == win_length {
            return win_score(Side::Computer, plies_left);
        }
        if player_count == win_length {
            return win_score(Side::Player, plies_left);
        }
        score = score.saturating_add(line_potential(player_count, computer_count));
    }
    score
}

fn line_potential(player_count: usize, computer_count: usize) -> Score {
    match (player_count, computer_count) {
        (0, 0) => 0,
        (n, 0) => potential(n),
        (0, n) => -potential(n),
        _ => 0,
    }
}

fn potential(stones: usize) -> Score {
    (10 as Score).saturating_pow(stones as u32)
}
