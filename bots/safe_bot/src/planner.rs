use kerfuffle::{BoardSnapshot, Dir, Pos};

/// Directions to try from `heading`, most preferred first. Reversing is never an option.
fn candidates(heading: Dir) -> [Dir; 3] {
    let right = Dir::new(-heading.y, heading.x);
    [heading, right, right.opposite()]
}

fn is_safe(snapshot: &BoardSnapshot, player_id: &str, path: &[Pos], next: Pos) -> bool {
    snapshot.in_bounds(next)
        && !path.contains(&next)
        && !snapshot
            .tile(next)
            .is_some_and(|tile| tile.has_tail_of(player_id))
}

/// Plans five steps from `pos` that stay on the board and avoid the player's own trail.
///
/// Unknown tiles outside the visible window count as safe. When no step is safe,
/// the bot keeps going straight.
pub fn plan_moves(snapshot: &BoardSnapshot, player_id: &str, pos: Pos, heading: Dir) -> [Dir; 5] {
    let mut path = vec![pos];
    let mut pos = pos;
    let mut heading = heading;
    let mut moves = [heading; 5];
    for mv in moves.iter_mut() {
        let dir = candidates(heading)
            .into_iter()
            .find(|&dir| is_safe(snapshot, player_id, &path, pos + dir))
            .unwrap_or(heading);
        pos = pos + dir;
        path.push(pos);
        heading = dir;
        *mv = dir;
    }
    moves
}
