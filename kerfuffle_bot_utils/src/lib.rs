mod config;
mod error;
mod locator;
mod observe;
mod registrar;
mod supervisor;
#[cfg(test)]
mod testing;
mod transport;
mod turn;
pub use config::*;
pub use error::*;
pub use locator::*;
pub use observe::*;
pub use registrar::*;
pub use supervisor::*;
pub use transport::*;
pub use turn::*;

use kerfuffle::{BoardSnapshot, Dir};

/// A trait to simplify writing bots.
pub trait Bot {
    /// Called at the start of every game with the initial snapshot, the name the
    /// server assigned to this bot, and the bot's id in this game.
    fn new_game(&mut self, initial: &BoardSnapshot, assigned_name: &str, player_id: &str);

    /// The moves for the next turn.
    ///
    /// There is no timeout: a bot that never returns stalls the whole session.
    fn decide(&mut self, snapshot: &BoardSnapshot) -> [Dir; 5];

    /// Registers under `desired_name` and plays one game after another,
    /// reconnecting whenever the server goes away.
    fn play(self, config: ClientConfig, desired_name: &str) -> !
    where
        Self: Sized,
    {
        let transport = HttpTransport::from_config(&config);
        Supervisor::new(transport, TracingObserver, config, self, desired_name).run()
    }
}
