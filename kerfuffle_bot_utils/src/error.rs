/// The error type for one call into the session engine.
///
/// The [`Supervisor`](crate::Supervisor) recovers from every variant, but
/// [connection-class](SessionError::is_connection_class) errors cost the
/// player its registration.
#[derive(Debug)]
pub enum SessionError {
    /// The server could not be reached, or registration ran out of attempts.
    ConnectionFailure { reason: String },
    /// The server rejected the bearer token.
    AuthFailure { status: u16 },
    /// A well-formed request was answered with an unexpected status.
    ProtocolFailure { operation: &'static str, status: u16 },
    /// The response body did not have the expected shape.
    DecodeFailure(serde_json::Error),
    /// The registered player is missing from the roster of the joined game.
    PlayerNotInRoster { name: String },
}

impl SessionError {
    /// Errors after which the session has to be re-established from scratch.
    pub fn is_connection_class(&self) -> bool {
        matches!(
            self,
            SessionError::ConnectionFailure { .. } | SessionError::AuthFailure { .. }
        )
    }

    /// The error followed by all of its sources, one per line.
    pub fn detail(&self) -> String {
        let mut detail = self.to_string();
        let mut err_dyn = self as &dyn std::error::Error;
        while let Some(src_err) = err_dyn.source() {
            detail += &format!("\n  caused by: {}", src_err);
            err_dyn = src_err;
        }
        detail
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::DecodeFailure(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::ConnectionFailure { reason } => {
                write!(f, "Failed to connect: {}", reason)
            }
            SessionError::AuthFailure { status } => {
                write!(f, "The server rejected the player's token ({})", status)
            }
            SessionError::ProtocolFailure { operation, status } => {
                write!(f, "Failed to {}: unexpected status {}", operation, status)
            }
            SessionError::DecodeFailure(_) => {
                write!(f, "The server sent a response of unexpected shape")
            }
            SessionError::PlayerNotInRoster { name } => {
                write!(f, "Player '{}' is not part of the game's roster", name)
            }
        }
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::DecodeFailure(err)
    }
}
