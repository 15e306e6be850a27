//! Solve a single position: exact value and optimal move

use anyhow::{Context, Result, bail};
use clap::Args;
use serde::Serialize;

use crate::board::BoardState;
use crate::cli::output;
use crate::lines::LineAnalyzer;
use crate::search::{self, Algorithm, SearchReport};

#[derive(Args)]
pub struct SolveArgs {
    /// Board state, row-major; '.' or ' ' is empty, optional _X/_O suffix
    /// names the player to move
    pub state: String,

    /// Search algorithm: negamax, memoized, symmetric, symmetric-eager,
    /// alpha-beta
    #[arg(long, default_value = "alpha-beta")]
    pub algorithm: String,

    /// Emit the report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct SolveOutput {
    state: String,
    algorithm: String,
    #[serde(flatten)]
    report: SearchReport,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let state = BoardState::from_string(&args.state)
        .with_context(|| format!("failed to parse board '{}'", args.state))?;
    if !state.is_valid() {
        bail!("board '{}' is not reachable by legal play", args.state);
    }

    let algorithm: Algorithm = args.algorithm.parse()?;
    let report = search::solve(algorithm, &state);

    if args.json {
        let output = SolveOutput {
            state: state.encode(),
            algorithm: algorithm.to_string(),
            report: report.clone(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    output::print_section("Position");
    println!("{state}");
    output::print_kv("to move", &state.to_move.to_char().to_string());

    let mut winning: Vec<usize> =
        LineAnalyzer::winning_moves(&state.cells, state.side, state.to_move)
            .into_iter()
            .collect();
    winning.sort_unstable();
    if !winning.is_empty() {
        output::print_kv("immediate wins", &format!("{winning:?}"));
    }

    output::print_section("Result");
    output::print_kv("algorithm", &algorithm.to_string());
    let verdict = match report.value {
        1 => "win for the player to move",
        0 => "draw",
        -1 => "loss for the player to move",
        _ => "unexpected",
    };
    output::print_kv("value", &format!("{} ({verdict})", report.value));
    match report.best_move {
        Some(pos) => output::print_kv("best move", &pos.to_string()),
        None => output::print_kv("best move", "none (game over)"),
    }
    output::print_kv("nodes", &output::format_number(report.stats.nodes));
    output::print_kv("leaves", &output::format_number(report.stats.leaves));
    output::print_kv("table hits", &output::format_number(report.stats.table_hits));
    output::print_kv(
        "table entries",
        &output::format_number(report.table_entries as u64),
    );

    Ok(())
}
