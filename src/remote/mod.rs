//! Playing against an opponent through a move relay server.
//!
//! The server only relays moves: we create or join a game, submit our moves as `<row>,<col>`
//! strings and poll for the most recent move. The latest move is our own until the opponent
//! has replied, so polling continues until the move id differs from the id of our last submission.

use std::error;
use std::thread;
use std::time::Duration;

use log::{debug, info};
use thiserror::Error;

use crate::game::{Game, Outcome};
use crate::position::{MoveError, Side, Square};

#[cfg(feature = "remote")]
pub mod http;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("request to the move server failed: {0}")]
    Transport(#[source] Box<dyn error::Error + Send + Sync>),
    #[error("move server rejected {request}: {message}")]
    Rejected {
        request: &'static str,
        message: String,
    },
    #[error("malformed reply to {request}: {reason}")]
    MalformedReply {
        request: &'static str,
        reason: String,
    },
    #[error("opponent sent an unplayable move: {0}")]
    IllegalMove(#[from] MoveError),
}

/// A move as reported by the server
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteMove {
    pub id: String,
    pub square: Square,
}

/// The requests the engine needs from a move relay server.
pub trait MatchServer {
    /// Create a game between two teams, returning the new game's id
    fn create_game(
        &mut self,
        team_id: &str,
        opponent_team_id: &str,
        size: usize,
        win_length: usize,
    ) -> Result<String, RemoteError>;

    /// Submit a move, returning its move id
    fn make_move(&mut self, game_id: &str, team_id: &str, mv: Square)
        -> Result<String, RemoteError>;

    /// The most recent move of the game, if any moves have been played
    fn latest_move(&mut self, game_id: &str) -> Result<Option<RemoteMove>, RemoteError>;
}

/// A game against a remote opponent. Our engine plays the computer side,
/// and the remote opponent is the player side.
pub struct RemoteMatch<'a, M: MatchServer> {
    server: &'a mut M,
    game: Game,
    game_id: String,
    team_id: String,
    last_move_id: Option<String>,
    poll_interval: Duration,
}

impl<'a, M: MatchServer> RemoteMatch<'a, M> {
    /// Create a new game against `opponent_team_id`, and play the centre square as the first move
    pub fn host(
        server: &'a mut M,
        team_id: &str,
        opponent_team_id: &str,
        game: Game,
        poll_interval: Duration,
    ) -> Result<Self, RemoteError> {
        let size = game.position().size();
        let game_id = server.create_game(
            team_id,
            opponent_team_id,
            size,
            game.position().win_length(),
        )?;
        info!("Created game {} against team {}", game_id, opponent_team_id);

        let mut remote_match = Self::join(server, team_id, &game_id, game, poll_interval);
        let centre = Square::new(size / 2, size / 2);
        remote_match.game.play_move(Side::Computer, centre)?;
        remote_match.submit_move(centre)?;
        Ok(remote_match)
    }

    /// Join an existing game, where the opponent moves first
    pub fn join(
        server: &'a mut M,
        team_id: &str,
        game_id: &str,
        game: Game,
        poll_interval: Duration,
    ) -> Self {
        RemoteMatch {
            server,
            game,
            game_id: game_id.to_string(),
            team_id: team_id.to_string(),
            last_move_id: None,
            poll_interval,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    /// Alternate between waiting for the opponent and replying, until the game is decided
    pub fn play(&mut self) -> Result<Outcome, RemoteError> {
        loop {
            let opponent_move = self.wait_for_opponent()?;
            if let Some(outcome) = self.game.play_move(Side::Player, opponent_move)? {
                return Ok(outcome);
            }
            debug!("Board after opponent move:\n{}", self.game.position());

            let Some((mv, outcome)) = self.game.play_computer_move() else {
                return Ok(Outcome::Draw);
            };
            self.submit_move(mv)?;
            if let Some(outcome) = outcome {
                return Ok(outcome);
            }
        }
    }

    fn submit_move(&mut self, mv: Square) -> Result<(), RemoteError> {
        let move_id = self.server.make_move(&self.game_id, &self.team_id, mv)?;
        info!("Submitted move {} as move id {}", mv, move_id);
        self.last_move_id = Some(move_id);
        Ok(())
    }

    /// Poll the server until it reports a move other than our own last move
    pub fn wait_for_opponent(&mut self) -> Result<Square, RemoteError> {
        loop {
            if let Some(latest) = self.server.latest_move(&self.game_id)? {
                if self.last_move_id.as_deref() != Some(latest.id.as_str()) {
                    info!("Opponent played {} as move id {}", latest.square, latest.id);
                    return Ok(latest.square);
                }
            }
            thread::sleep(self.poll_interval);
        }
    }
}
