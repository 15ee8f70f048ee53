use kerfuffle::GameListing;

use crate::{PollPolicy, SessionError, SessionEvent, SessionObserver, Transport};

const OK: u16 = 200;
const UNAUTHORIZED: u16 = 401;
const FORBIDDEN: u16 = 403;

/// Lists the games this player may join, in server order.
pub fn list_games(transport: &mut impl Transport, token: &str) -> Result<Vec<GameListing>, SessionError> {
    match transport.request("/games", Some(token), None)? {
        (OK, response) => Ok(serde_json::from_value(response)?),
        (status @ (UNAUTHORIZED | FORBIDDEN), _) => Err(SessionError::AuthFailure { status }),
        (status, _) => Err(SessionError::ProtocolFailure {
            operation: "list games",
            status,
        }),
    }
}

/// Polls the lobby until a game is open and returns the first one's name.
///
/// There is no upper bound on the number of polls.
pub fn find_joinable_game(
    transport: &mut impl Transport,
    observer: &mut impl SessionObserver,
    token: &str,
    policy: &PollPolicy,
) -> Result<String, SessionError> {
    observer.on_event(&SessionEvent::SearchingForGame);
    loop {
        if let Some(game) = list_games(transport, token)?.into_iter().next() {
            observer.on_event(&SessionEvent::GameJoined {
                game: game.name.clone(),
            });
            return Ok(game.name);
        }
        std::thread::sleep(policy.interval());
    }
}
