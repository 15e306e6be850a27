//! Count the reachable state space, raw and up to symmetry

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::output;
use crate::space;

#[derive(Args)]
pub struct CountArgs {
    /// Board side (3 or 4); side 4 enumerates millions of states
    #[arg(long, default_value_t = 3)]
    pub size: usize,
}

pub fn execute(args: CountArgs) -> Result<()> {
    let spinner = output::create_spinner(&format!(
        "enumerating reachable {0}x{0} states",
        args.size
    ));
    let summary = space::summarize(args.size)
        .with_context(|| format!("board side {}", args.size))?;
    spinner.finish_and_clear();

    output::print_section(&format!("State space on {0}x{0}", args.size));
    output::print_kv(
        "reachable states",
        &output::format_number(summary.reachable as u64),
    );
    output::print_kv(
        "canonical states",
        &output::format_number(summary.canonical as u64),
    );
    let ratio = summary.reachable as f64 / summary.canonical as f64;
    output::print_kv("reduction", &format!("{ratio:.2}x"));

    Ok(())
}
