use clap::Parser;
use kerfuffle::{BoardSnapshot, Dir};
use kerfuffle_bot_utils::{initialize_logging, Bot, ConnectionArgs};
use tracing::debug;

mod planner;

use planner::plan_moves;

#[derive(Parser)]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,
}

/// Keeps moving straight until the edge of the board or its own trail is in the way.
struct SafeBot {
    player_id: String,
    heading: Dir,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.connection.log_level);
    let config = args.connection.client_config()?;
    SafeBot {
        player_id: String::new(),
        heading: Dir::RIGHT,
    }
    .play(config, &args.connection.name)
}

impl Bot for SafeBot {
    fn new_game(&mut self, initial: &BoardSnapshot, assigned_name: &str, player_id: &str) {
        debug!(assigned_name, player_id, "New game");
        debug!("\n{}", initial);
        self.player_id = String::from(player_id);
        self.heading = Dir::RIGHT;
    }

    fn decide(&mut self, snapshot: &BoardSnapshot) -> [Dir; 5] {
        let Some(me) = snapshot.player(&self.player_id) else {
            return [self.heading; 5];
        };
        let heading = me.dir.unwrap_or(self.heading);
        let Some(pos) = me.pos else {
            return [heading; 5];
        };
        let moves = plan_moves(snapshot, &self.player_id, pos, heading);
        debug!(?pos, ?moves, "Planned turn");
        self.heading = moves[4];
        moves
    }
}
