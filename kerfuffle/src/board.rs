use std::str::FromStr;

use serde::Deserialize;

use crate::{MalformedData, PlayerState, Pos};

/// The state of a single tile, decoded from the server's `"owner,tail"` strings.
///
/// Both components hold player ids as in [`PlayerState::id`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct TileState {
    /// The player who has claimed this tile.
    pub owner: Option<String>,
    /// The player whose unclaimed trail runs across this tile.
    pub tail: Option<String>,
}

/// A point-in-time view of one game, as returned for every submitted move set.
///
/// The grid only covers the window around the local player: `board[y][x]`
/// is the tile at absolute position `view_origin + (x, y)`.
// A terminal snapshot only carries `over`, everything else is left at its default.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawBoardSnapshot")]
pub struct BoardSnapshot {
    pub board_width: usize,
    pub board_height: usize,
    pub view_origin: Pos,
    pub board: Vec<Vec<TileState>>,
    pub players: Vec<PlayerState>,
    /// Milliseconds until the game ends, if the server sent it.
    pub time_left: Option<i64>,
    pub over: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBoardSnapshot {
    board_width: usize,
    board_height: usize,
    view_origin: Pos,
    board: Vec<Vec<TileState>>,
    players: Vec<PlayerState>,
    #[serde(default)]
    time_left: Option<i64>,
    #[serde(default)]
    over: Option<bool>,
}

impl TileState {
    pub fn is_empty(&self) -> bool {
        self.owner.is_none() && self.tail.is_none()
    }

    pub fn is_owned_by(&self, player_id: &str) -> bool {
        self.owner.as_deref() == Some(player_id)
    }

    pub fn has_tail_of(&self, player_id: &str) -> bool {
        self.tail.as_deref() == Some(player_id)
    }
}

impl FromStr for TileState {
    type Err = MalformedData;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.split(',');
        let mut next_id = || {
            parts
                .next()
                .filter(|part| !part.is_empty())
                .map(String::from)
        };
        let owner = next_id();
        let tail = next_id();
        if parts.next().is_some() {
            return Err(MalformedData::Tile {
                raw: String::from(raw),
            });
        }
        Ok(Self { owner, tail })
    }
}

impl TryFrom<String> for TileState {
    type Error = MalformedData;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl std::fmt::Display for TileState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{},{}",
            self.owner.as_deref().unwrap_or(""),
            self.tail.as_deref().unwrap_or("")
        )
    }
}

impl TryFrom<RawBoardSnapshot> for BoardSnapshot {
    type Error = MalformedData;

    fn try_from(raw: RawBoardSnapshot) -> Result<Self, Self::Error> {
        let view_width = raw.board.first().map_or(0, Vec::len);
        for (row, tiles) in raw.board.iter().enumerate() {
            if tiles.len() != view_width {
                return Err(MalformedData::RaggedBoard {
                    row,
                    len: tiles.len(),
                    expected: view_width,
                });
            }
        }

        let view_height = raw.board.len();
        let origin = raw.view_origin;
        let fits = origin.x >= 0
            && origin.y >= 0
            && origin.x as usize + view_width <= raw.board_width
            && origin.y as usize + view_height <= raw.board_height;
        if !fits {
            return Err(MalformedData::ViewOutOfBounds {
                origin_x: origin.x,
                origin_y: origin.y,
                view_width,
                view_height,
                board_width: raw.board_width,
                board_height: raw.board_height,
            });
        }

        Ok(Self {
            board_width: raw.board_width,
            board_height: raw.board_height,
            view_origin: raw.view_origin,
            board: raw.board,
            players: raw.players,
            time_left: raw.time_left,
            over: raw.over.unwrap_or(false),
        })
    }
}

impl BoardSnapshot {
    /// The snapshot standing in for a server response that only says the game is over.
    pub fn game_over() -> Self {
        Self {
            over: true,
            ..Self::default()
        }
    }

    pub fn view_width(&self) -> usize {
        self.board.first().map_or(0, Vec::len)
    }

    pub fn view_height(&self) -> usize {
        self.board.len()
    }

    /// Whether `pos` lies on the full board (visible or not).
    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && (pos.x as usize) < self.board_width
            && (pos.y as usize) < self.board_height
    }

    /// The tile at an absolute position, or `None` if it is outside the visible window.
    pub fn tile(&self, pos: Pos) -> Option<&TileState> {
        let x = usize::try_from(pos.x.checked_sub(self.view_origin.x)?).ok()?;
        let y = usize::try_from(pos.y.checked_sub(self.view_origin.y)?).ok()?;
        self.board.get(y)?.get(x)
    }

    /// All visible tiles with their absolute positions, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (Pos, &TileState)> + '_ {
        let origin = self.view_origin;
        self.board.iter().enumerate().flat_map(move |(y, row)| {
            row.iter().enumerate().map(move |(x, tile)| {
                (Pos::new(origin.x + x as i32, origin.y + y as i32), tile)
            })
        })
    }

    pub fn player(&self, id: &str) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_by_name(&self, name: &str) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.name == name)
    }
}
