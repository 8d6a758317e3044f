#[cfg(test)]
mod game_tests;
#[cfg(test)]
mod remote_tests;

#[cfg(test)]
use crate::position::{Position, Side, Square};

#[cfg(test)]
fn position_from_moves(
    size: usize,
    win_length: usize,
    player_moves: &[(usize, usize)],
    computer_moves: &[(usize, usize)],
) -> Position {
    let mut position = Position::new(size, win_length);
    for &(row, col) in player_moves {
        position.place(Side::Player, Square::new(row, col));
    }
    for &(row, col) in computer_moves {
        position.place(Side::Computer, Square::new(row, col));
    }
    check_invariants(&position);
    position
}

/// The move sets must mirror the occupied cells exactly
#[cfg(test)]
fn check_invariants(position: &Position) {
    let player_moves = position.moves(Side::Player);
    let computer_moves = position.moves(Side::Computer);
    let mut occupied = 0;
    for square in position.squares() {
        match position[square].side() {
            Some(Side::Player) => {
                occupied += 1;
                assert!(
                    player_moves.contains(&square),
                    "{} missing from player moves\n{}",
                    square,
                    position
                );
                assert!(
                    !computer_moves.contains(&square),
                    "{} in both move sets\n{}",
                    square,
                    position
                );
            }
            Some(Side::Computer) => {
                occupied += 1;
                assert!(
                    computer_moves.contains(&square),
                    "{} missing from computer moves\n{}",
                    square,
                    position
                );
                assert!(
                    !player_moves.contains(&square),
                    "{} in both move sets\n{}",
                    square,
                    position
                );
            }
            None => {
                assert!(!player_moves.contains(&square) && !computer_moves.contains(&square));
            }
        }
    }
    assert_eq!(occupied, player_moves.len() + computer_moves.len());
    assert_eq!(
        position.empty_count(),
        position.size() * position.size() - occupied
    );
}
