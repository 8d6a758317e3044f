//! Candidate move generation.
//!
//! Only empty squares close to stones already on the board are proposed, since a winning line
//! has to grow out of an existing group. On an empty board every square is a candidate.

use crate::position::{Position, Side, Square};

/// Adds every empty square within Chebyshev distance `radius` of an occupied square to `moves`,
/// each at most once. Squares near the player's stones come first, then those near the computer's.
///
/// Falls back to every empty square if that gives no candidates, which with a positive radius
/// only happens on an empty board.
pub fn generate_moves(position: &Position, radius: usize, moves: &mut Vec<Square>) {
    let size = position.size();
    let mut seen = vec![false; size * size];
    let num_moves_before = moves.len();

    for side in [Side::Player, Side::Computer] {
        for &occupied in position.moves(side) {
            for square in occupied.neighbourhood(radius, size) {
                let index = square.row() * size + square.col();
                if !seen[index] && position[square].is_empty() {
                    seen[index] = true;
                    moves.push(square);
                }
            }
        }
    }

    if moves.len() == num_moves_before {
        moves.extend(position.empty_squares());
    }
}
