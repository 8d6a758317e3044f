use std::io::{self, Cursor};

use crate::game::{format_moves, Game, Outcome};
use crate::position::{MoveError, Side, Square};
use crate::search::SearchSettings;

/// Unparsable or illegal lines first, then every square in row-major order
fn scripted_input() -> Cursor<String> {
    let mut lines = vec!["abc", "1,1", "0 0 0", "-1 0", "3 3", ""]
        .into_iter()
        .map(String::from)
        .collect::<Vec<_>>();
    for row in 0..3 {
        for col in 0..3 {
            lines.push(format!("{} {}", row, col));
        }
    }
    Cursor::new(lines.join("\n") + "\n")
}

fn squares(moves: &[(usize, usize)]) -> Vec<Square> {
    moves.iter().map(|&(row, col)| Square::new(row, col)).collect()
}

fn play_scripted(computer_first: bool) -> (Game, Outcome, String) {
    let mut game = Game::new(3, 3, SearchSettings::default());
    let mut output = vec![];
    let outcome = game
        .play_human_vs_computer(scripted_input(), &mut output, computer_first)
        .unwrap();
    (game, outcome, String::from_utf8(output).unwrap())
}

#[test]
fn human_moves_first_test() {
    let (game, outcome, output) = play_scripted(false);
    assert_eq!(outcome, Outcome::ComputerWin);
    assert_eq!(
        game.position().moves(Side::Player).iter().copied().collect::<Vec<_>>(),
        squares(&[(0, 0), (0, 1), (1, 0)])
    );
    assert_eq!(
        game.position().moves(Side::Computer).iter().copied().collect::<Vec<_>>(),
        squares(&[(0, 2), (1, 1), (2, 0)])
    );

    assert!(output.starts_with("- - - \n- - - \n- - - \nEnter row, col coordinates:"));
    assert!(output.contains("Computer wins!\n"));
    assert!(output.contains("Computer moves: (0,2) (1,1) (2,0)\n"));
    assert!(output.contains("Player moves: (0,0) (0,1) (1,0)\n"));
    assert!(output.ends_with("X X O \nX O - \nO - - \n"));
}

#[test]
fn computer_moves_first_test() {
    let (game, outcome, output) = play_scripted(true);
    assert_eq!(outcome, Outcome::ComputerWin);
    assert_eq!(
        game.position().moves(Side::Player).iter().copied().collect::<Vec<_>>(),
        squares(&[(0, 0), (0, 1), (1, 0)])
    );
    assert_eq!(
        game.position().moves(Side::Computer).iter().copied().collect::<Vec<_>>(),
        squares(&[(0, 2), (1, 1), (2, 0), (2, 2)])
    );
    assert!(output.contains("Computer wins!\n"));
}

#[test]
fn input_ends_early_test() {
    let mut game = Game::new(3, 3, SearchSettings::default());
    let result = game.play_human_vs_computer(Cursor::new("0 0\n"), io::sink(), false);
    assert_eq!(result.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    assert_eq!(game.position().empty_count(), 7);
}

#[test]
fn human_completes_line_test() {
    let mut game = Game::new(1, 1, SearchSettings::default());
    let outcome = game
        .play_human_vs_computer(Cursor::new("0 0\n"), io::sink(), false)
        .unwrap();
    assert_eq!(outcome, Outcome::PlayerWin);

    let mut game = Game::new(1, 1, SearchSettings::default());
    let outcome = game
        .play_human_vs_computer(Cursor::new(""), io::sink(), true)
        .unwrap();
    assert_eq!(outcome, Outcome::ComputerWin);
}

#[test]
fn unwinnable_game_is_drawn_test() {
    let mut game = Game::new(2, 3, SearchSettings::default().depth(2));
    let input = "0 0\n0 1\n1 0\n1 1\n".repeat(2);
    let mut output = vec![];
    let outcome = game
        .play_human_vs_computer(Cursor::new(input), &mut output, true)
        .unwrap();
    assert_eq!(outcome, Outcome::Draw);
    assert!(game.position().is_full());
    assert!(String::from_utf8(output).unwrap().contains("Game ends in a draw\n"));
}

#[test]
fn play_move_test() {
    let mut game = Game::new(3, 3, SearchSettings::default());
    assert_eq!(game.play_move(Side::Player, Square::new(0, 0)), Ok(None));
    assert_eq!(
        game.play_move(Side::Computer, Square::new(0, 0)),
        Err(MoveError::Occupied(Square::new(0, 0)))
    );
    assert_eq!(
        game.play_move(Side::Computer, Square::new(0, 3)),
        Err(MoveError::OutOfBounds(Square::new(0, 3)))
    );
    assert_eq!(game.play_move(Side::Player, Square::new(1, 1)), Ok(None));
    assert_eq!(
        game.play_move(Side::Player, Square::new(2, 2)),
        Ok(Some(Outcome::PlayerWin))
    );
}

#[test]
fn computer_move_on_full_board_test() {
    let mut game = Game::new(1, 2, SearchSettings::default());
    assert_eq!(
        game.play_move(Side::Player, Square::new(0, 0)),
        Ok(Some(Outcome::Draw))
    );
    assert_eq!(game.play_computer_move(), None);
}

#[test]
fn format_moves_test() {
    let mut game = Game::new(4, 3, SearchSettings::default());
    assert_eq!(format_moves(game.position(), Side::Player), "");
    game.play_move(Side::Player, Square::new(3, 1)).unwrap();
    game.play_move(Side::Player, Square::new(0, 2)).unwrap();
    assert_eq!(format_moves(game.position(), Side::Player), "(0,2) (3,1)");
}

#[test]
fn outcome_display_test() {
    assert_eq!(Outcome::win_for(Side::Player).to_string(), "Player wins!");
    assert_eq!(Outcome::win_for(Side::Computer).to_string(), "Computer wins!");
    assert_eq!(Outcome::Draw.to_string(), "Game ends in a draw");
}
