use std::collections::VecDeque;

use serde_json::{json, Value};

use crate::{ClientConfig, PollPolicy, RetryPolicy, SessionError, Transport};

enum Reply {
    Status(u16, Value),
    Refused,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct RecordedRequest {
    pub path: String,
    pub token: Option<String>,
    pub body: Option<Value>,
}

/// Replays canned replies in order and records every request.
///
/// Once the script runs out, every request fails as if the server were down.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    replies: VecDeque<Reply>,
    pub requests: Vec<RecordedRequest>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, status: u16, body: Value) -> Self {
        self.replies.push_back(Reply::Status(status, body));
        self
    }

    pub fn refuse(mut self, times: usize) -> Self {
        self.replies.extend((0..times).map(|_| Reply::Refused));
        self
    }

    pub fn requests_to(&self, path: &str) -> usize {
        self.requests.iter().filter(|r| r.path == path).count()
    }

    pub fn is_exhausted(&self) -> bool {
        self.replies.is_empty()
    }
}

impl Transport for ScriptedTransport {
    fn request(
        &mut self,
        path: &str,
        token: Option<&str>,
        body: Option<&Value>,
    ) -> Result<(u16, Value), SessionError> {
        self.requests.push(RecordedRequest {
            path: String::from(path),
            token: token.map(String::from),
            body: body.cloned(),
        });
        match self.replies.pop_front() {
            Some(Reply::Status(status, body)) => Ok((status, body)),
            Some(Reply::Refused) | None => Err(SessionError::ConnectionFailure {
                reason: String::from("Connection refused"),
            }),
        }
    }
}

/// The default config without any waiting.
pub(crate) fn instant_config() -> ClientConfig {
    ClientConfig {
        registration: RetryPolicy {
            max_attempts: 50,
            backoff_ms: 0,
        },
        lobby_poll: PollPolicy { interval_ms: 0 },
        ..ClientConfig::default()
    }
}

/// A small running game with `right_bot` as player 1.
pub(crate) fn snapshot_json() -> Value {
    snapshot_for("right_bot")
}

/// A small running game with `name` as player 1.
pub(crate) fn snapshot_for(name: &str) -> Value {
    json!({
        "boardWidth": 10,
        "boardHeight": 10,
        "viewOrigin": {"x": 0, "y": 0},
        "board": [["1,", ""], ["", ",1"]],
        "players": [
            {"id": 1, "name": name, "score": 1, "pos": {"x": 1, "y": 1}},
            {"id": 2, "name": "left_bot", "score": 1},
        ],
    })
}
