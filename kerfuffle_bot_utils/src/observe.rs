use tracing::{error, info, warn};

/// Progress and recovery notices emitted by the session engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A registration attempt failed; `attempt` is the 1-based number of the next one.
    RegistrationRetry { attempt: u32 },
    Registered { name: String },
    SearchingForGame,
    GameJoined { game: String },
    GameOver { game: String },
    /// A connection-class error; the player is about to register again.
    ConnectionLost { error: String },
    /// Any other error, with its full source chain; the player is going back to the lobby.
    ReturningToLobby { detail: String },
}

/// Sink for [`SessionEvent`]s.
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

/// Forwards events to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingObserver;

impl SessionObserver for TracingObserver {
    fn on_event(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::RegistrationRetry { attempt } => {
                warn!(attempt, "Failed to connect. Retrying...")
            }
            SessionEvent::Registered { name } => info!(player = %name, "Player name assigned"),
            SessionEvent::SearchingForGame => info!("Checking for available games..."),
            SessionEvent::GameJoined { game } => info!(game = %game, "Auto-joining game"),
            SessionEvent::GameOver { game } => info!(game = %game, "Game over"),
            SessionEvent::ConnectionLost { error } => {
                warn!(error = %error, "Server connection lost. Reconnecting...")
            }
            SessionEvent::ReturningToLobby { detail } => {
                error!("{}", detail);
                info!("Error playing game. Back to lobby.");
            }
        }
    }
}

/// Collects events, for inspection in tests or by an embedding program.
impl SessionObserver for Vec<SessionEvent> {
    fn on_event(&mut self, event: &SessionEvent) {
        self.push(event.clone());
    }
}

impl<O: SessionObserver + ?Sized> SessionObserver for &mut O {
    fn on_event(&mut self, event: &SessionEvent) {
        (**self).on_event(event)
    }
}
