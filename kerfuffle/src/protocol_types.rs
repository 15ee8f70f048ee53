use serde::{Deserialize, Serialize};

/// Body of `POST /players`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterPlayer {
    pub name: String,
    /// Whether the server should keep this player's session alive across reconnects.
    pub persistent: bool,
}

/// The identity handed out by a successful registration.
///
/// A new registration yields a new token, and possibly a different name.
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct Player {
    pub name: String,
    pub token: String,
}

/// One entry of the `GET /games` listing. Fields other than the name are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct GameListing {
    pub name: String,
}

// The token is a credential, keep it out of logs.
impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn registration_response_ignores_extra_fields() {
        let player: Player = serde_json::from_value(json!({
            "name": "right_bot2",
            "token": "T1",
            "persistent": false,
        }))
        .unwrap();
        assert_eq!(player.name, "right_bot2");
        assert_eq!(player.token, "T1");
        assert!(!format!("{:?}", player).contains("T1"));
    }

    #[test]
    fn game_listing() {
        let games: Vec<GameListing> =
            serde_json::from_value(json!([{"name": "g1", "players": 3}, {"name": "g2"}])).unwrap();
        assert_eq!(games[0].name, "g1");
        assert_eq!(games.len(), 2);
    }
}
