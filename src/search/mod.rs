//! Search engine: four interchangeable exact evaluators
//!
//! All four algorithms compute the same game-theoretic value for every
//! well-formed state; they differ only in how much of the tree they visit.
//! Top-level calls report the first ascending-index move attaining the best
//! value, so ties break deterministically and every variant selects the
//! same move.

mod alpha_beta;
mod negamax;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::table::TranspositionTable;

/// Strictly below every achievable payoff; the initial alpha bound
pub(crate) const VALUE_MIN: i32 = -2;
/// Strictly above every achievable payoff; the initial beta bound
pub(crate) const VALUE_MAX: i32 = 2;

/// How the symmetric search variant uses the transposition table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CacheStrategy {
    /// Store a computed value under all 8 image keys; look up the raw key
    Eager,
    /// Store under the raw key only; probe all 8 image keys on lookup
    Lazy,
}

/// Closed enumeration of the search algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    /// Exhaustive negamax with no caching
    Negamax,
    /// Negamax memoized on raw state keys
    Memoized,
    /// Negamax memoized across symmetry orbits
    SymmetricMemoized(CacheStrategy),
    /// Negamax with alpha-beta pruning, no caching
    AlphaBeta,
}

impl Algorithm {
    /// Every algorithm variant, with both symmetric cache strategies
    pub fn all() -> [Algorithm; 5] {
        [
            Algorithm::Negamax,
            Algorithm::Memoized,
            Algorithm::SymmetricMemoized(CacheStrategy::Eager),
            Algorithm::SymmetricMemoized(CacheStrategy::Lazy),
            Algorithm::AlphaBeta,
        ]
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Algorithm::Negamax => "negamax",
            Algorithm::Memoized => "memoized",
            Algorithm::SymmetricMemoized(CacheStrategy::Eager) => "symmetric-eager",
            Algorithm::SymmetricMemoized(CacheStrategy::Lazy) => "symmetric-lazy",
            Algorithm::AlphaBeta => "alpha-beta",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Algorithm {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "negamax" | "plain" => Ok(Algorithm::Negamax),
            "memoized" | "memo" => Ok(Algorithm::Memoized),
            "symmetric" | "symmetric-lazy" => {
                Ok(Algorithm::SymmetricMemoized(CacheStrategy::Lazy))
            }
            "symmetric-eager" => Ok(Algorithm::SymmetricMemoized(CacheStrategy::Eager)),
            "alpha-beta" | "alphabeta" => Ok(Algorithm::AlphaBeta),
            _ => Err(crate::Error::ParseAlgorithm {
                input: s.to_string(),
                expected: "negamax, memoized, symmetric, symmetric-eager, alpha-beta".to_string(),
            }),
        }
    }
}

/// Counters accumulated over one top-level search call
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Evaluator invocations, including memoization hits
    pub nodes: u64,
    /// Terminal states evaluated via payoff
    pub leaves: u64,
    /// Lookups answered from the transposition table
    pub table_hits: u64,
}

/// Result of one top-level search call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReport {
    /// Game value for the player to move
    pub value: i32,
    /// Best move, `None` when the state is terminal
    pub best_move: Option<usize>,
    pub stats: SearchStats,
    /// Entries accumulated in the transposition table, 0 for uncached variants
    pub table_entries: usize,
}

/// Run `algorithm` in top-level mode: the exact value for the player to
/// move, the first ascending-index move attaining it, and search counters.
///
/// Each call owns a fresh transposition table for its whole recursion; the
/// table never outlives the call.
pub fn solve(algorithm: Algorithm, state: &BoardState) -> SearchReport {
    let mut scratch = state.clone();
    let mut stats = SearchStats::default();

    let (value, best_move, table_entries) = match algorithm {
        Algorithm::Negamax => {
            let (value, best_move) = negamax::best_plain(&mut scratch, &mut stats);
            (value, best_move, 0)
        }
        Algorithm::Memoized => {
            let mut table = TranspositionTable::new();
            let (value, best_move) = negamax::best_memoized(&mut scratch, &mut table, &mut stats);
            (value, best_move, table.len())
        }
        Algorithm::SymmetricMemoized(strategy) => {
            let mut table = TranspositionTable::new();
            let (value, best_move) =
                negamax::best_symmetric(&mut scratch, strategy, &mut table, &mut stats);
            (value, best_move, table.len())
        }
        Algorithm::AlphaBeta => {
            let (value, best_move) = alpha_beta::best_alpha_beta(&mut scratch, &mut stats);
            (value, best_move, 0)
        }
    };

    SearchReport {
        value,
        best_move,
        stats,
        table_entries,
    }
}

/// Best move for the player to move in `state`.
///
/// # Errors
///
/// Returns [`Error::NoValidMoves`] when the state is terminal.
///
/// [`Error::NoValidMoves`]: crate::Error::NoValidMoves
pub fn select_move(algorithm: Algorithm, state: &BoardState) -> crate::Result<usize> {
    solve(algorithm, state)
        .best_move
        .ok_or(crate::Error::NoValidMoves)
}

/// Drive a full game: repeatedly select a move for the player to move and
/// apply it until the position is terminal. Returns the ordered move
/// history and the terminal state.
pub fn play(
    algorithm: Algorithm,
    initial: &BoardState,
) -> crate::Result<(Vec<usize>, BoardState)> {
    let mut state = initial.clone();
    let mut history = Vec::new();

    while !state.is_terminal() {
        let pos = select_move(algorithm, &state)?;
        state = state.make_move(pos)?;
        history.push(pos);
    }

    Ok((history, state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_parsing() {
        assert_eq!("negamax".parse::<Algorithm>().unwrap(), Algorithm::Negamax);
        assert_eq!("memo".parse::<Algorithm>().unwrap(), Algorithm::Memoized);
        assert_eq!(
            "symmetric".parse::<Algorithm>().unwrap(),
            Algorithm::SymmetricMemoized(CacheStrategy::Lazy)
        );
        assert_eq!(
            "symmetric-eager".parse::<Algorithm>().unwrap(),
            Algorithm::SymmetricMemoized(CacheStrategy::Eager)
        );
        assert_eq!(
            "alpha-beta".parse::<Algorithm>().unwrap(),
            Algorithm::AlphaBeta
        );
        assert!("minimax".parse::<Algorithm>().is_err());
    }

    #[test]
    fn algorithm_display_round_trips() {
        for algorithm in Algorithm::all() {
            let parsed: Algorithm = algorithm.to_string().parse().unwrap();
            assert_eq!(parsed, algorithm);
        }
    }

    #[test]
    fn select_move_rejects_terminal_state() {
        let mut state = BoardState::new(3).unwrap();
        for pos in [0, 3, 1, 4, 2] {
            state = state.make_move(pos).unwrap();
        }
        assert!(state.is_terminal());
        assert!(matches!(
            select_move(Algorithm::AlphaBeta, &state),
            Err(crate::Error::NoValidMoves)
        ));
    }

    #[test]
    fn solve_on_terminal_state_reports_payoff() {
        let mut state = BoardState::new(3).unwrap();
        for pos in [0, 3, 1, 4, 2] {
            state = state.make_move(pos).unwrap();
        }
        // O to move, X has won
        let report = solve(Algorithm::Memoized, &state);
        assert_eq!(report.value, -1);
        assert_eq!(report.best_move, None);
        assert_eq!(report.stats.leaves, 1);
    }

    #[test]
    fn optimal_self_play_draws_on_3x3() {
        let initial = BoardState::new(3).unwrap();
        let (history, terminal) = play(Algorithm::AlphaBeta, &initial).unwrap();
        assert_eq!(history.len(), 9, "optimal play fills the board");
        assert_eq!(terminal.winner(), None);
    }
}
