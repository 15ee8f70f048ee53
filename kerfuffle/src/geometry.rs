use std::ops::Add;

use serde::{Deserialize, Serialize};

/// An absolute location on the board.
///
/// `x` grows to the right, `y` grows downwards (rows of the board are indexed by `y`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

/// A movement delta. A move submitted to the server is a `Dir`.
///
/// Valid moves have length one along a single axis, see [`Dir::ALL`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dir {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Dir {
    pub const UP: Dir = Dir { x: 0, y: -1 };
    pub const DOWN: Dir = Dir { x: 0, y: 1 };
    pub const LEFT: Dir = Dir { x: -1, y: 0 };
    pub const RIGHT: Dir = Dir { x: 1, y: 0 };

    /// The four unit directions.
    pub const ALL: [Dir; 4] = [Dir::UP, Dir::RIGHT, Dir::DOWN, Dir::LEFT];

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn opposite(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        Pos {
            x: self.x + dir.x,
            y: self.y + dir.y,
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let arrow = match *self {
            Dir::UP => "↑",
            Dir::DOWN => "↓",
            Dir::LEFT => "←",
            Dir::RIGHT => "→",
            Dir { x, y } => return write!(f, "<{}, {}>", x, y),
        };
        write!(f, "{}", arrow)
    }
}
