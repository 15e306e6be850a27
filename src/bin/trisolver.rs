//! trisolver CLI - exact solver driver for generalized tic-tac-toe
//!
//! This CLI provides a unified interface for:
//! - Solving positions (exact value and optimal move)
//! - Self-play games, optionally against a random baseline
//! - Benchmarking the four search algorithms against each other
//! - Counting the reachable state space, raw and up to symmetry

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "trisolver")]
#[command(version, about = "Exact solver for generalized tic-tac-toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a position: exact value and optimal move
    Solve(trisolver::cli::commands::solve::SolveArgs),

    /// Run a self-play game
    Play(trisolver::cli::commands::play::PlayArgs),

    /// Benchmark the search algorithms
    Bench(trisolver::cli::commands::bench::BenchArgs),

    /// Count the reachable state space
    Count(trisolver::cli::commands::count::CountArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => trisolver::cli::commands::solve::execute(args),
        Commands::Play(args) => trisolver::cli::commands::play::execute(args),
        Commands::Bench(args) => trisolver::cli::commands::bench::execute(args),
        Commands::Count(args) => trisolver::cli::commands::count::execute(args),
    }
}
