use clap::Parser;
use kerfuffle::{BoardSnapshot, Dir};
use kerfuffle_bot_utils::{initialize_logging, Bot, ConnectionArgs};

#[derive(Parser)]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,
}

/// Always heads right.
struct RightBot;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.connection.log_level);
    let config = args.connection.client_config()?;
    RightBot.play(config, &args.connection.name)
}

impl Bot for RightBot {
    fn new_game(&mut self, _initial: &BoardSnapshot, _assigned_name: &str, _player_id: &str) {}

    fn decide(&mut self, _snapshot: &BoardSnapshot) -> [Dir; 5] {
        [Dir::RIGHT; 5]
    }
}
