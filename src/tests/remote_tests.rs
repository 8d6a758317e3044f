use std::time::Duration;

use crate::game::{Game, Outcome};
use crate::position::{MoveError, Position, Side, Square};
use crate::remote::{MatchServer, RemoteError, RemoteMatch, RemoteMove};
use crate::search::SearchSettings;

/// In-memory move server, where the opponent answers when polled.
/// The first poll after each of our moves echoes that move back, like the real server does.
struct MockServer {
    board: Option<Position>,
    created: Vec<(String, String, usize, usize)>,
    moves: Vec<(Side, RemoteMove)>,
    echo_pending: bool,
    opponent: fn(&Position) -> Square,
}

impl MockServer {
    fn new(opponent: fn(&Position) -> Square) -> Self {
        MockServer {
            board: None,
            created: vec![],
            moves: vec![],
            echo_pending: false,
            opponent,
        }
    }

    fn with_board(size: usize, win_length: usize, opponent: fn(&Position) -> Square) -> Self {
        let mut server = Self::new(opponent);
        server.board = Some(Position::new(size, win_length));
        server
    }

    fn record(&mut self, side: Side, square: Square) -> RemoteMove {
        if let Some(board) = self.board.as_mut() {
            board.try_place(side, square).ok();
        }
        let remote_move = RemoteMove {
            id: (1000 + self.moves.len()).to_string(),
            square,
        };
        self.moves.push((side, remote_move.clone()));
        remote_move
    }

    fn history(&self) -> Vec<(Side, Square)> {
        self.moves
            .iter()
            .map(|(side, remote_move)| (*side, remote_move.square))
            .collect()
    }
}

impl MatchServer for MockServer {
    fn create_game(
        &mut self,
        team_id: &str,
        opponent_team_id: &str,
        size: usize,
        win_length: usize,
    ) -> Result<String, RemoteError> {
        self.created.push((
            team_id.to_string(),
            opponent_team_id.to_string(),
            size,
            win_length,
        ));
        self.board = Some(Position::new(size, win_length));
        Ok("4242".to_string())
    }

    fn make_move(&mut self, game_id: &str, team_id: &str, mv: Square) -> Result<String, RemoteError> {
        assert_eq!(game_id, "4242");
        assert_eq!(team_id, "1");
        self.echo_pending = true;
        Ok(self.record(Side::Computer, mv).id)
    }

    fn latest_move(&mut self, game_id: &str) -> Result<Option<RemoteMove>, RemoteError> {
        assert_eq!(game_id, "4242");
        match self.moves.last() {
            Some((Side::Computer, our_move)) if self.echo_pending => {
                self.echo_pending = false;
                Ok(Some(our_move.clone()))
            }
            Some((Side::Player, their_move)) => Ok(Some(their_move.clone())),
            _ => {
                let board = self.board.as_ref().expect("Game was never created");
                let square = (self.opponent)(board);
                Ok(Some(self.record(Side::Player, square)))
            }
        }
    }
}

fn first_empty_square(position: &Position) -> Square {
    position.empty_squares().next().unwrap()
}

fn centre_square(_: &Position) -> Square {
    Square::new(1, 1)
}

fn history(moves: &[(Side, (usize, usize))]) -> Vec<(Side, Square)> {
    moves
        .iter()
        .map(|&(side, (row, col))| (side, Square::new(row, col)))
        .collect()
}

#[test]
fn host_game_test() {
    use Side::*;
    let mut server = MockServer::new(first_empty_square);
    let game = Game::new(3, 3, SearchSettings::default());
    let mut remote_match = RemoteMatch::host(&mut server, "1", "2", game, Duration::ZERO).unwrap();
    assert_eq!(remote_match.game_id(), "4242");
    assert_eq!(remote_match.play().unwrap(), Outcome::ComputerWin);
    assert_eq!(remote_match.game().position().empty_count(), 2);

    assert_eq!(server.created, vec![("1".to_string(), "2".to_string(), 3, 3)]);
    assert_eq!(
        server.history(),
        history(&[
            (Computer, (1, 1)),
            (Player, (0, 0)),
            (Computer, (2, 2)),
            (Player, (0, 1)),
            (Computer, (0, 2)),
            (Player, (1, 0)),
            (Computer, (2, 0)),
        ])
    );
}

#[test]
fn join_game_test() {
    use Side::*;
    let mut server = MockServer::with_board(3, 3, first_empty_square);
    let game = Game::new(3, 3, SearchSettings::default());
    let mut remote_match = RemoteMatch::join(&mut server, "1", "4242", game, Duration::ZERO);
    assert_eq!(remote_match.play().unwrap(), Outcome::ComputerWin);

    assert!(server.created.is_empty());
    assert_eq!(
        server.history(),
        history(&[
            (Player, (0, 0)),
            (Computer, (1, 1)),
            (Player, (0, 1)),
            (Computer, (0, 2)),
            (Player, (1, 0)),
            (Computer, (2, 0)),
        ])
    );
}

#[test]
fn host_larger_board_test() {
    use Side::*;
    let mut server = MockServer::new(first_empty_square);
    let game = Game::new(5, 4, SearchSettings::default());
    let mut remote_match = RemoteMatch::host(&mut server, "1", "2", game, Duration::ZERO).unwrap();
    assert_eq!(remote_match.play().unwrap(), Outcome::ComputerWin);

    assert_eq!(server.created, vec![("1".to_string(), "2".to_string(), 5, 4)]);
    assert_eq!(
        server.history(),
        history(&[
            (Computer, (2, 2)),
            (Player, (0, 0)),
            (Computer, (3, 3)),
            (Player, (0, 1)),
            (Computer, (3, 1)),
            (Player, (0, 2)),
            (Computer, (0, 3)),
            (Player, (0, 4)),
            (Computer, (3, 2)),
            (Player, (1, 0)),
            (Computer, (3, 4)),
        ])
    );
}

#[test]
fn own_move_is_not_the_opponents_reply_test() {
    let mut server = MockServer::new(first_empty_square);
    let game = Game::new(3, 3, SearchSettings::default());
    let mut remote_match = RemoteMatch::host(&mut server, "1", "2", game, Duration::ZERO).unwrap();
    assert_eq!(remote_match.wait_for_opponent().unwrap(), Square::new(0, 0));
    assert!(!server.echo_pending);
    assert_eq!(server.moves.len(), 2);
}

#[test]
fn occupied_reply_is_rejected_test() {
    let mut server = MockServer::new(centre_square);
    let game = Game::new(3, 3, SearchSettings::default());
    let mut remote_match = RemoteMatch::host(&mut server, "1", "2", game, Duration::ZERO).unwrap();
    match remote_match.play() {
        Err(RemoteError::IllegalMove(MoveError::Occupied(square))) => {
            assert_eq!(square, Square::new(1, 1))
        }
        other => panic!("Expected an illegal move error, got {:?}", other),
    }
}
