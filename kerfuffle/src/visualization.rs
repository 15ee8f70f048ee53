use std::collections::HashMap;

use crate::{BoardSnapshot, Pos, TileState};

/// Renders the visible window of the board, one character per tile.
///
/// Players are lettered in roster order: their territory is shown in lowercase,
/// their trail in uppercase, and their head as `@`.
pub fn visualize_view(snapshot: &BoardSnapshot) -> String {
    let letters: HashMap<&str, u8> = snapshot
        .players
        .iter()
        .enumerate()
        .map(|(idx, p)| (p.id.as_str(), (idx % 26) as u8))
        .collect();
    let heads: Vec<Pos> = snapshot.players.iter().filter_map(|p| p.pos).collect();

    let tile_char = |pos: Pos, tile: &TileState| -> char {
        if heads.contains(&pos) {
            return '@';
        }
        let letter = |id: &Option<String>| id.as_deref().and_then(|id| letters.get(id)).copied();
        if let Some(idx) = letter(&tile.tail) {
            (b'A' + idx) as char
        } else if let Some(idx) = letter(&tile.owner) {
            (b'a' + idx) as char
        } else if tile.is_empty() {
            '·'
        } else {
            '?'
        }
    };

    let width = snapshot.view_width();
    let mut result = format!("╭{}╮\n", "─".repeat(width));
    for (idx, (pos, tile)) in snapshot.tiles().enumerate() {
        if idx % width == 0 {
            result.push('│');
        }
        result.push(tile_char(pos, tile));
        if idx % width == width - 1 {
            result += "│\n";
        }
    }
    result += &format!("╰{}╯", "─".repeat(width));
    result
}

impl std::fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.over {
            return write!(f, "Game over");
        }
        write!(
            f,
            "{}x{} board, {}x{} view at {}",
            self.board_width,
            self.board_height,
            self.view_width(),
            self.view_height(),
            self.view_origin
        )?;
        if let Some(ms) = self.time_left {
            write!(f, ", {} ms left", ms)?;
        }
        writeln!(f)?;
        for (idx, p) in self.players.iter().enumerate() {
            write!(f, "  {} #{} {:<16} score {:>5}", (b'a' + (idx % 26) as u8) as char, p.id, p.name, p.score)?;
            if let Some(pos) = p.pos {
                write!(f, " at {}", pos)?;
            }
            if let Some(dir) = p.dir {
                write!(f, " heading {}", dir)?;
            }
            writeln!(f)?;
        }
        write!(f, "{}", visualize_view(self))
    }
}
