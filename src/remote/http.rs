//! Move relay server over HTTP, with url-encoded requests and JSON replies.

use log::debug;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::Value;

use super::{MatchServer, RemoteError, RemoteMove};
use crate::position::Square;

pub const DEFAULT_API_URL: &str = "https://www.notexponential.com/aip2pgaming/api/index.php";

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        RemoteError::Transport(Box::new(err))
    }
}

#[derive(Deserialize)]
struct MoveRecord {
    #[serde(rename = "moveId")]
    move_id: Value,
    #[serde(rename = "move")]
    mv: String,
}

pub struct HttpMatchServer {
    client: Client,
    api_url: String,
    user_id: String,
    api_key: String,
}

impl HttpMatchServer {
    pub fn new(api_url: &str, user_id: &str, api_key: &str) -> Result<Self, RemoteError> {
        Ok(HttpMatchServer {
            client: Client::builder().build()?,
            api_url: api_url.to_string(),
            user_id: user_id.to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn post(&self, request: &'static str, payload: String) -> Result<Value, RemoteError> {
        debug!("< POST {}", payload);
        let reply: Value = self
            .client
            .post(&self.api_url)
            .header("userId", &self.user_id)
            .header("x-api-key", &self.api_key)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(payload)
            .send()?
            .error_for_status()?
            .json()?;
        debug!("> {}", reply);
        check_reply(request, reply)
    }

    fn get(&self, request: &'static str, payload: String) -> Result<Value, RemoteError> {
        debug!("< GET {}", payload);
        let reply: Value = self
            .client
            .get(format!("{}?{}", self.api_url, payload))
            .header("userId", &self.user_id)
            .header("x-api-key", &self.api_key)
            .send()?
            .error_for_status()?
            .json()?;
        debug!("> {}", reply);
        check_reply(request, reply)
    }
}

impl MatchServer for HttpMatchServer {
    fn create_game(
        &mut self,
        team_id: &str,
        opponent_team_id: &str,
        size: usize,
        win_length: usize,
    ) -> Result<String, RemoteError> {
        let reply = self.post(
            "create_game",
            format!(
                "type=game&teamId1={}&teamId2={}&gameType=TTT&boardSize={}&target={}",
                team_id, opponent_team_id, size, win_length
            ),
        )?;
        id_field("create_game", &reply["gameId"])
    }

    fn make_move(
        &mut self,
        game_id: &str,
        team_id: &str,
        mv: Square,
    ) -> Result<String, RemoteError> {
        let reply = self.post(
            "make_move",
            format!("type=move&gameId={}&teamId={}&move={}", game_id, team_id, mv),
        )?;
        id_field("make_move", &reply["moveId"])
    }

    fn latest_move(&mut self, game_id: &str) -> Result<Option<RemoteMove>, RemoteError> {
        let mut reply = self.get("get_moves", format!("type=moves&gameId={}&count=1", game_id))?;
        let moves: Vec<MoveRecord> = match reply.get_mut("moves").map(Value::take) {
            None | Some(Value::Null) => vec![],
            Some(moves) => serde_json::from_value(moves).map_err(|err| RemoteError::MalformedReply {
                request: "get_moves",
                reason: err.to_string(),
            })?,
        };
        match moves.into_iter().next() {
            None => Ok(None),
            Some(record) => Ok(Some(RemoteMove {
                id: id_field("get_moves", &record.move_id)?,
                square: record.mv.parse()?,
            })),
        }
    }
}

fn check_reply(request: &'static str, reply: Value) -> Result<Value, RemoteError> {
    if reply["code"] == "OK" {
        Ok(reply)
    } else {
        Err(RemoteError::Rejected {
            request,
            message: reply["message"]
                .as_str()
                .map(ToString::to_string)
                .unwrap_or_else(|| reply.to_string()),
        })
    }
}

/// Ids are sometimes sent as numbers and sometimes as strings
fn id_field(request: &'static str, value: &Value) -> Result<String, RemoteError> {
    match value {
        Value::String(id) => Ok(id.clone()),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(RemoteError::MalformedReply {
            request,
            reason: format!("expected an id, got {}", other),
        }),
    }
}
