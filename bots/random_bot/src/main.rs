use clap::Parser;
use kerfuffle::{BoardSnapshot, Dir};
use kerfuffle_bot_utils::{initialize_logging, Bot, ConnectionArgs};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

#[derive(Parser)]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    initialize_logging(args.connection.log_level);
    let config = args.connection.client_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let rng = StdRng::seed_from_u64(seed);

    RandomBot {
        rng,
        player_id: String::new(),
    }
    .play(config, &args.connection.name)
}

struct RandomBot {
    rng: StdRng,
    player_id: String,
}

impl Bot for RandomBot {
    fn new_game(&mut self, _initial: &BoardSnapshot, _assigned_name: &str, player_id: &str) {
        self.player_id = String::from(player_id);
    }

    fn decide(&mut self, snapshot: &BoardSnapshot) -> [Dir; 5] {
        // Turning around runs straight into our own trail
        let mut heading = snapshot.player(&self.player_id).and_then(|p| p.dir);
        std::array::from_fn(|_| {
            let options: Vec<Dir> = Dir::ALL
                .into_iter()
                .filter(|dir| Some(dir.opposite()) != heading)
                .collect();
            let dir = *options.choose(&mut self.rng).unwrap();
            heading = Some(dir);
            dir
        })
    }
}
