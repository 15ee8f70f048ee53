use kerfuffle::Player;

use crate::{
    find_joinable_game, register, submit_moves, Bot, ClientConfig, SessionError, SessionEvent,
    SessionObserver, Transport,
};

/// Where the [`Supervisor`] currently is in the session lifecycle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionState {
    Registering,
    Locating,
    Playing { game: String },
}

/// Keeps a bot connected across games and outages.
///
/// Connection-class errors send the supervisor back to registering under the
/// originally requested name. Any other error is logged and the supervisor
/// returns to the lobby, keeping its registration.
pub struct Supervisor<T, O, B> {
    transport: T,
    observer: O,
    config: ClientConfig,
    bot: B,
    desired_name: String,
    player: Option<Player>,
    state: SessionState,
}

impl<T: Transport, O: SessionObserver, B: Bot> Supervisor<T, O, B> {
    pub fn new(transport: T, observer: O, config: ClientConfig, bot: B, desired_name: &str) -> Self {
        Self {
            transport,
            observer,
            config,
            bot,
            desired_name: String::from(desired_name),
            player: None,
            state: SessionState::Registering,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// The most recent registration, if any.
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn bot(&self) -> &B {
        &self.bot
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Runs until the process is stopped.
    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    /// Runs the current state to completion and returns the next one.
    ///
    /// Registering and locating may block for a long time, playing lasts for a whole game.
    pub fn step(&mut self) -> &SessionState {
        let state = std::mem::replace(&mut self.state, SessionState::Registering);
        self.state = match self.advance(state) {
            Ok(next) => next,
            Err(err) => self.recover(err),
        };
        &self.state
    }

    fn advance(&mut self, state: SessionState) -> Result<SessionState, SessionError> {
        match state {
            SessionState::Registering => {
                let player = register(
                    &mut self.transport,
                    &mut self.observer,
                    &self.desired_name,
                    self.config.persistent,
                    &self.config.registration,
                )?;
                self.player = Some(player);
                Ok(SessionState::Locating)
            }
            SessionState::Locating => {
                let Some(player) = &self.player else {
                    return Ok(SessionState::Registering);
                };
                let game = find_joinable_game(
                    &mut self.transport,
                    &mut self.observer,
                    &player.token,
                    &self.config.lobby_poll,
                )?;
                Ok(SessionState::Playing { game })
            }
            SessionState::Playing { game } => {
                let Some(player) = self.player.clone() else {
                    return Ok(SessionState::Registering);
                };
                self.play_game(&player, &game)?;
                Ok(SessionState::Locating)
            }
        }
    }

    fn play_game(&mut self, player: &Player, game: &str) -> Result<(), SessionError> {
        let mut snapshot = submit_moves(&mut self.transport, &player.token, game, &[])?;
        if !snapshot.over {
            let player_id = snapshot
                .player_by_name(&player.name)
                .map(|p| p.id.clone())
                .ok_or_else(|| SessionError::PlayerNotInRoster {
                    name: player.name.clone(),
                })?;
            self.bot.new_game(&snapshot, &player.name, &player_id);

            while !snapshot.over {
                let moves = self.bot.decide(&snapshot);
                snapshot = submit_moves(&mut self.transport, &player.token, game, &moves)?;
            }
        }
        self.observer.on_event(&SessionEvent::GameOver {
            game: String::from(game),
        });
        Ok(())
    }

    fn recover(&mut self, err: SessionError) -> SessionState {
        if err.is_connection_class() {
            self.observer.on_event(&SessionEvent::ConnectionLost {
                error: err.to_string(),
            });
            SessionState::Registering
        } else {
            self.observer.on_event(&SessionEvent::ReturningToLobby {
                detail: err.detail(),
            });
            if self.player.is_some() {
                SessionState::Locating
            } else {
                SessionState::Registering
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use kerfuffle::{BoardSnapshot, Dir};
    use serde_json::json;

    use super::*;
    use crate::testing::{instant_config, snapshot_for, snapshot_json, ScriptedTransport};

    #[derive(Default)]
    struct RecordingBot {
        games: Vec<(String, String)>,
        turns: usize,
    }

    impl Bot for RecordingBot {
        fn new_game(&mut self, _initial: &BoardSnapshot, assigned_name: &str, player_id: &str) {
            self.games
                .push((String::from(assigned_name), String::from(player_id)));
        }

        fn decide(&mut self, _snapshot: &BoardSnapshot) -> [Dir; 5] {
            self.turns += 1;
            [Dir::RIGHT; 5]
        }
    }

    type TestSupervisor = Supervisor<ScriptedTransport, Vec<SessionEvent>, RecordingBot>;

    fn supervisor(transport: ScriptedTransport) -> TestSupervisor {
        Supervisor::new(
            transport,
            Vec::new(),
            instant_config(),
            RecordingBot::default(),
            "right_bot",
        )
    }

    fn registered(name: &str, token: &str) -> ScriptedTransport {
        ScriptedTransport::new().reply(201, json!({"name": name, "token": token}))
    }

    fn playing(transport: ScriptedTransport) -> TestSupervisor {
        let mut sup = supervisor(transport);
        assert_eq!(sup.step(), &SessionState::Locating);
        assert_eq!(
            sup.step(),
            &SessionState::Playing {
                game: String::from("g1")
            }
        );
        sup
    }

    #[test]
    fn plays_a_game_and_returns_to_the_lobby() {
        let transport = registered("right_bot", "T1")
            .reply(200, json!([]))
            .reply(200, json!([{"name": "g1"}]))
            .reply(200, snapshot_json())
            .reply(200, snapshot_json())
            .reply(200, snapshot_json())
            .reply(200, json!({"over": true}));
        let mut sup = playing(transport);
        assert_eq!(sup.transport().requests_to("/games"), 2);

        assert_eq!(sup.step(), &SessionState::Locating);
        assert_eq!(
            sup.bot().games,
            vec![(String::from("right_bot"), String::from("1"))]
        );
        assert_eq!(sup.bot().turns, 3);
        assert_eq!(sup.transport().requests_to("/games/g1"), 4);
        assert_eq!(sup.transport().requests_to("/players"), 1);
        assert_eq!(
            sup.observer().last(),
            Some(&SessionEvent::GameOver {
                game: String::from("g1")
            })
        );

        // Every turn after the initial fetch submits a full move set
        let moves = sup.transport().requests[4].body.clone().unwrap();
        assert_eq!(moves.as_array().unwrap().len(), 5);
        assert!(sup.transport().is_exhausted());
    }

    #[test]
    fn connection_loss_while_playing_registers_again() {
        let transport = registered("right_bot_2", "T1")
            .reply(200, json!([{"name": "g1"}]))
            .reply(200, snapshot_for("right_bot_2"))
            .refuse(1)
            .reply(201, json!({"name": "right_bot_3", "token": "T2"}));
        let mut sup = playing(transport);

        assert_eq!(sup.step(), &SessionState::Registering);
        assert_eq!(sup.bot().games[0].0, "right_bot_2");
        assert!(matches!(
            sup.observer().last(),
            Some(SessionEvent::ConnectionLost { .. })
        ));
        // Still holding the old registration until a new one replaces it
        assert_eq!(sup.player().unwrap().token, "T1");

        assert_eq!(sup.step(), &SessionState::Locating);
        let registration = sup.transport().requests.last().unwrap();
        assert_eq!(registration.path, "/players");
        assert_eq!(registration.body.as_ref().unwrap()["name"], json!("right_bot"));
        assert_eq!(sup.player().unwrap().name, "right_bot_3");
        assert_eq!(sup.player().unwrap().token, "T2");
    }

    #[test]
    fn rejected_token_registers_again() {
        let transport = registered("right_bot", "T1").reply(403, json!({}));
        let mut sup = supervisor(transport);
        assert_eq!(sup.step(), &SessionState::Locating);
        assert_eq!(sup.step(), &SessionState::Registering);
        assert!(matches!(
            sup.observer().last(),
            Some(SessionEvent::ConnectionLost { .. })
        ));
    }

    #[test]
    fn protocol_failure_returns_to_the_lobby() {
        let transport = registered("right_bot", "T1")
            .reply(200, json!([{"name": "g1"}]))
            .reply(200, snapshot_json())
            .reply(500, json!({}));
        let mut sup = playing(transport);

        assert_eq!(sup.step(), &SessionState::Locating);
        assert_eq!(sup.transport().requests_to("/players"), 1);
        match sup.observer().last() {
            Some(SessionEvent::ReturningToLobby { detail }) => {
                assert!(detail.contains("unexpected status 500"), "{}", detail)
            }
            other => panic!("Unexpected event {:?}", other),
        }
    }

    #[test]
    fn malformed_snapshot_returns_to_the_lobby() {
        let transport = registered("right_bot", "T1")
            .reply(200, json!([{"name": "g1"}]))
            .reply(200, json!({"players": "nope"}));
        let mut sup = playing(transport);

        assert_eq!(sup.step(), &SessionState::Locating);
        assert!(sup.bot().games.is_empty());
        match sup.observer().last() {
            Some(SessionEvent::ReturningToLobby { detail }) => {
                assert!(detail.contains("caused by"), "{}", detail)
            }
            other => panic!("Unexpected event {:?}", other),
        }
    }

    #[test]
    fn missing_from_roster_returns_to_the_lobby() {
        let transport = registered("right_bot", "T1")
            .reply(200, json!([{"name": "g1"}]))
            .reply(200, snapshot_for("someone_else"));
        let mut sup = playing(transport);

        assert_eq!(sup.step(), &SessionState::Locating);
        assert!(sup.bot().games.is_empty());
        assert!(matches!(
            sup.observer().last(),
            Some(SessionEvent::ReturningToLobby { .. })
        ));
    }

    #[test]
    fn game_already_over_skips_the_bot() {
        let transport = registered("right_bot", "T1")
            .reply(200, json!([{"name": "g1"}]))
            .reply(200, json!({"over": true}));
        let mut sup = playing(transport);

        assert_eq!(sup.step(), &SessionState::Locating);
        assert!(sup.bot().games.is_empty());
        assert_eq!(sup.bot().turns, 0);
    }

    #[test]
    fn exhausted_registration_keeps_registering() {
        let mut config = instant_config();
        config.registration.max_attempts = 3;
        let transport = ScriptedTransport::new()
            .refuse(3)
            .reply(201, json!({"name": "right_bot", "token": "T1"}));
        let mut sup = Supervisor::new(transport, Vec::new(), config, RecordingBot::default(), "right_bot");

        assert_eq!(sup.step(), &SessionState::Registering);
        assert!(sup.player().is_none());
        assert_eq!(sup.step(), &SessionState::Locating);
        assert_eq!(sup.transport().requests_to("/players"), 4);
    }
}
