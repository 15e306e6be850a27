//! Benchmark the search algorithms over a full self-play game

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Args;

use crate::board::BoardState;
use crate::cli::output;
use crate::search::{self, Algorithm, SearchStats};

#[derive(Args)]
pub struct BenchArgs {
    /// Board side (3 or 4)
    #[arg(long, default_value_t = 3)]
    pub size: usize,

    /// Comma-separated algorithms to benchmark; defaults to every variant
    /// on 3x3 and to alpha-beta alone on 4x4
    #[arg(long, value_delimiter = ',')]
    pub algorithms: Vec<String>,
}

struct BenchRow {
    algorithm: Algorithm,
    elapsed: Duration,
    moves: usize,
    stats: SearchStats,
    table_entries: usize,
}

pub fn execute(args: BenchArgs) -> Result<()> {
    let initial =
        BoardState::new(args.size).with_context(|| format!("board side {}", args.size))?;

    let algorithms: Vec<Algorithm> = if args.algorithms.is_empty() {
        if args.size >= 4 {
            // the unpruned, uncached tree is astronomically large here
            vec![Algorithm::AlphaBeta]
        } else {
            Algorithm::all().to_vec()
        }
    } else {
        args.algorithms
            .iter()
            .map(|s| s.parse::<Algorithm>())
            .collect::<crate::Result<_>>()?
    };

    output::print_section(&format!("Self-play benchmark on {0}x{0}", args.size));

    let mut rows = Vec::new();
    for algorithm in algorithms {
        let spinner = output::create_spinner(&format!("benchmarking {algorithm}"));
        rows.push(bench_one(algorithm, &initial)?);
        spinner.finish_with_message(format!("{algorithm} done"));
    }

    println!(
        "\n  {:<16} {:>10} {:>6} {:>14} {:>12} {:>12}",
        "algorithm", "seconds", "moves", "nodes", "leaves", "entries"
    );
    for row in rows {
        println!(
            "  {:<16} {:>10.3} {:>6} {:>14} {:>12} {:>12}",
            row.algorithm.to_string(),
            row.elapsed.as_secs_f64(),
            row.moves,
            output::format_number(row.stats.nodes),
            output::format_number(row.stats.leaves),
            output::format_number(row.table_entries as u64),
        );
    }

    Ok(())
}

/// Play one full game, totalling the per-move search work.
///
/// Each move solves its position from scratch with a fresh table, the same
/// contract the engine gives the interactive driver.
fn bench_one(algorithm: Algorithm, initial: &BoardState) -> Result<BenchRow> {
    let mut state = initial.clone();
    let mut moves = 0usize;
    let mut stats = SearchStats::default();
    let mut table_entries = 0usize;

    let start = Instant::now();
    while !state.is_terminal() {
        let report = search::solve(algorithm, &state);
        let pos = report.best_move.expect("live position has a best move");

        stats.nodes += report.stats.nodes;
        stats.leaves += report.stats.leaves;
        stats.table_hits += report.stats.table_hits;
        table_entries += report.table_entries;

        state = state.make_move(pos)?;
        moves += 1;
    }

    Ok(BenchRow {
        algorithm,
        elapsed: start.elapsed(),
        moves,
        stats,
        table_entries,
    })
}
