use kerfuffle::{BoardSnapshot, Dir};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde_json::Value;

use crate::{SessionError, Transport};

const OK: u16 = 200;

// Everything but the unreserved characters, so that a game name stays a single path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub(crate) fn game_path(game: &str) -> String {
    format!("/games/{}", utf8_percent_encode(game, PATH_SEGMENT))
}

/// Submits moves for the next turn and returns the resulting snapshot.
///
/// An empty `moves` slice fetches the current state without moving.
/// If the server reports the game as over, the returned snapshot is
/// [`BoardSnapshot::game_over()`] and the rest of the response is ignored.
pub fn submit_moves(
    transport: &mut impl Transport,
    token: &str,
    game: &str,
    moves: &[Dir],
) -> Result<BoardSnapshot, SessionError> {
    let body = serde_json::to_value(moves)?;
    match transport.request(&game_path(game), Some(token), Some(&body))? {
        (OK, response) => {
            if response.get("over").and_then(Value::as_bool).unwrap_or(false) {
                Ok(BoardSnapshot::game_over())
            } else {
                Ok(serde_json::from_value(response)?)
            }
        }
        (status, _) => Err(SessionError::ProtocolFailure {
            operation: "send moves",
            status,
        }),
    }
}
