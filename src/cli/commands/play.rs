//! Self-play driver: optimal play, optionally against a random baseline

use anyhow::{Context, Result};
use clap::Args;
use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::board::{BoardState, Player};
use crate::cli::output;
use crate::game::{Game, GameOutcome};
use crate::search::{self, Algorithm};

#[derive(Args)]
pub struct PlayArgs {
    /// Board side (3 or 4)
    #[arg(long, default_value_t = 3)]
    pub size: usize,

    /// Search algorithm for the engine moves
    #[arg(long, default_value = "alpha-beta")]
    pub algorithm: String,

    /// Have O pick uniformly random legal moves with this seed instead of
    /// searching
    #[arg(long)]
    pub random_opponent: Option<u64>,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let algorithm: Algorithm = args.algorithm.parse()?;
    let initial =
        BoardState::new(args.size).with_context(|| format!("board side {}", args.size))?;

    let mut game = Game::new(initial);
    let mut rng = args.random_opponent.map(StdRng::seed_from_u64);

    while game.outcome.is_none() {
        let pos = match (&mut rng, game.current.to_move) {
            (Some(rng), Player::O) => {
                let moves = game.current.legal_moves();
                *moves
                    .choose(rng)
                    .expect("live game always has a legal move")
            }
            _ => search::select_move(algorithm, &game.current)?,
        };
        game.play(pos)?;
    }

    output::print_section(&format!("Self-play on {0}x{0}", args.size));
    println!("{}", game.current);
    println!("{}", game.history_line());
    let verdict = match game.outcome {
        Some(GameOutcome::Win(player)) => format!("{} wins", player.to_char()),
        Some(GameOutcome::Draw) => "draw".to_string(),
        None => unreachable!("loop exits only with an outcome"),
    };
    output::print_kv("outcome", &verdict);
    output::print_kv("algorithm", &algorithm.to_string());
    if let Some(seed) = args.random_opponent {
        output::print_kv("random O seed", &seed.to_string());
    }

    Ok(())
}
