use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{Dir, MalformedData, Pos};

/// One entry of the roster sent with every snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PlayerState {
    /// The id used for this player in [`TileState`](crate::TileState)s.
    ///
    /// The server sends a number, but any scalar is accepted and kept in its
    /// decimal string form.
    #[serde(deserialize_with = "id_from_scalar")]
    pub id: String,
    /// The name assigned by the server, which may differ from the requested one.
    pub name: String,
    /// The number of tiles owned by the player.
    pub score: i64,
    /// Absent when the player is outside the visible window.
    #[serde(default)]
    pub pos: Option<Pos>,
    /// Absent until the player has moved, or when outside the visible window.
    #[serde(default)]
    pub dir: Option<Dir>,
}

pub(crate) fn id_from_scalar<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(id) => Ok(id),
        Value::Number(id) => Ok(id.to_string()),
        other => Err(D::Error::custom(MalformedData::PlayerId {
            raw: other.to_string(),
        })),
    }
}
