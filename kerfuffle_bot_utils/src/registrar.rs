use kerfuffle::{Player, RegisterPlayer};
use serde_json::Value;

use crate::{RetryPolicy, SessionError, SessionEvent, SessionObserver, Transport};

const CREATED: u16 = 201;

/// Registers a player under `desired_name`, retrying according to `policy`.
///
/// Any status other than 201, a malformed 201 response, or a connection fault
/// counts as a failed attempt. Fails with [`SessionError::ConnectionFailure`]
/// once all attempts are used up.
pub fn register(
    transport: &mut impl Transport,
    observer: &mut impl SessionObserver,
    desired_name: &str,
    persistent: bool,
    policy: &RetryPolicy,
) -> Result<Player, SessionError> {
    let body = serde_json::to_value(RegisterPlayer {
        name: String::from(desired_name),
        persistent,
    })?;

    for attempt in 1..=policy.max_attempts {
        if attempt > 1 {
            observer.on_event(&SessionEvent::RegistrationRetry { attempt });
        }
        if let Some(player) = try_register(transport, &body) {
            observer.on_event(&SessionEvent::Registered {
                name: player.name.clone(),
            });
            return Ok(player);
        }
        if attempt < policy.max_attempts {
            std::thread::sleep(policy.backoff());
        }
    }

    Err(SessionError::ConnectionFailure {
        reason: format!(
            "gave up registering '{}' after {} attempts",
            desired_name, policy.max_attempts
        ),
    })
}

fn try_register(transport: &mut impl Transport, body: &Value) -> Option<Player> {
    match transport.request("/players", None, Some(body)) {
        Ok((CREATED, response)) => serde_json::from_value(response).ok(),
        _ => None,
    }
}
