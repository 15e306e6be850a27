//! Negamax evaluators: plain, memoized, and symmetry-aware
//!
//! One max-of-negations recursion; a value good for the opponent is bad for
//! the mover. Moves are applied in place and undone after the recursive
//! call returns, so every frame hands the board back unchanged.

use crate::board::BoardState;
use crate::symmetry::orbit_keys;
use crate::table::TranspositionTable;

use super::{CacheStrategy, SearchStats, VALUE_MIN};

/// Top-level plain negamax: exact value and first best move
pub(super) fn best_plain(
    state: &mut BoardState,
    stats: &mut SearchStats,
) -> (i32, Option<usize>) {
    stats.nodes += 1;
    if state.is_terminal() {
        stats.leaves += 1;
        return (state.payoff(state.to_move), None);
    }

    let mut best_value = VALUE_MIN;
    let mut best_move = None;
    for pos in state.empty_positions() {
        state.apply_move(pos);
        let value = -value_plain(state, stats);
        state.undo_move(pos);

        if value > best_value {
            best_value = value;
            best_move = Some(pos);
        }
    }
    (best_value, best_move)
}

fn value_plain(state: &mut BoardState, stats: &mut SearchStats) -> i32 {
    stats.nodes += 1;
    if state.is_terminal() {
        stats.leaves += 1;
        return state.payoff(state.to_move);
    }

    let mut best = VALUE_MIN;
    for pos in state.empty_positions() {
        state.apply_move(pos);
        let value = -value_plain(state, stats);
        state.undo_move(pos);

        if value > best {
            best = value;
        }
    }
    best
}

/// Top-level memoized negamax, keyed on raw state encodings.
///
/// The table caches interior values only; the chosen root move is never
/// stored, so the same table stays valid for any root.
pub(super) fn best_memoized(
    state: &mut BoardState,
    table: &mut TranspositionTable,
    stats: &mut SearchStats,
) -> (i32, Option<usize>) {
    stats.nodes += 1;
    if state.is_terminal() {
        stats.leaves += 1;
        return (state.payoff(state.to_move), None);
    }

    let mut best_value = VALUE_MIN;
    let mut best_move = None;
    for pos in state.empty_positions() {
        state.apply_move(pos);
        let value = -value_memoized(state, table, stats);
        state.undo_move(pos);

        if value > best_value {
            best_value = value;
            best_move = Some(pos);
        }
    }
    (best_value, best_move)
}

fn value_memoized(
    state: &mut BoardState,
    table: &mut TranspositionTable,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;
    let key = state.key();
    if let Some(value) = table.get(key) {
        stats.table_hits += 1;
        return value;
    }

    let value = if state.is_terminal() {
        stats.leaves += 1;
        state.payoff(state.to_move)
    } else {
        let mut best = VALUE_MIN;
        for pos in state.empty_positions() {
            state.apply_move(pos);
            let child = -value_memoized(state, table, stats);
            state.undo_move(pos);

            if child > best {
                best = child;
            }
        }
        best
    };

    table.put(key, value);
    value
}

/// Top-level symmetry-aware memoized negamax.
///
/// The game value is invariant under the dihedral transforms, so one cached
/// entry answers for all 8 images of a state. `CacheStrategy` picks which
/// side of the lookup pays for that sharing.
pub(super) fn best_symmetric(
    state: &mut BoardState,
    strategy: CacheStrategy,
    table: &mut TranspositionTable,
    stats: &mut SearchStats,
) -> (i32, Option<usize>) {
    stats.nodes += 1;
    if state.is_terminal() {
        stats.leaves += 1;
        return (state.payoff(state.to_move), None);
    }

    let mut best_value = VALUE_MIN;
    let mut best_move = None;
    for pos in state.empty_positions() {
        state.apply_move(pos);
        let value = -value_symmetric(state, strategy, table, stats);
        state.undo_move(pos);

        if value > best_value {
            best_value = value;
            best_move = Some(pos);
        }
    }
    (best_value, best_move)
}

fn value_symmetric(
    state: &mut BoardState,
    strategy: CacheStrategy,
    table: &mut TranspositionTable,
    stats: &mut SearchStats,
) -> i32 {
    stats.nodes += 1;
    if let Some(value) = probe(state, strategy, table) {
        stats.table_hits += 1;
        return value;
    }

    let value = if state.is_terminal() {
        stats.leaves += 1;
        state.payoff(state.to_move)
    } else {
        let mut best = VALUE_MIN;
        for pos in state.empty_positions() {
            state.apply_move(pos);
            let child = -value_symmetric(state, strategy, table, stats);
            state.undo_move(pos);

            if child > best {
                best = child;
            }
        }
        best
    };

    store(state, strategy, table, value);
    value
}

fn probe(
    state: &BoardState,
    strategy: CacheStrategy,
    table: &TranspositionTable,
) -> Option<i32> {
    match strategy {
        // every image was stored, so the raw key suffices
        CacheStrategy::Eager => table.get(state.key()),
        CacheStrategy::Lazy => orbit_keys(state).into_iter().find_map(|key| table.get(key)),
    }
}

fn store(
    state: &BoardState,
    strategy: CacheStrategy,
    table: &mut TranspositionTable,
    value: i32,
) {
    match strategy {
        CacheStrategy::Eager => {
            for key in orbit_keys(state) {
                table.put(key, value);
            }
        }
        CacheStrategy::Lazy => table.put(state.key(), value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(s: &str) -> BoardState {
        BoardState::from_string(s).unwrap()
    }

    #[test]
    fn plain_takes_the_immediate_win() {
        // X completes the top row at 2
        let mut board = state("XX.OO....");
        let mut stats = SearchStats::default();
        let (value, best_move) = best_plain(&mut board, &mut stats);
        assert_eq!(value, 1);
        assert_eq!(best_move, Some(2));
    }

    #[test]
    fn memoized_matches_plain_on_midgame_states() {
        for s in ["X...O....", "XOX.O....", "X..O.....", "XOXO....."] {
            let mut a = state(s);
            let mut b = state(s);
            let mut stats_a = SearchStats::default();
            let mut stats_b = SearchStats::default();
            let mut table = TranspositionTable::new();

            let plain = best_plain(&mut a, &mut stats_a);
            let memo = best_memoized(&mut b, &mut table, &mut stats_b);
            assert_eq!(plain, memo, "disagreement on '{s}'");
            assert!(!table.is_empty());
        }
    }

    #[test]
    fn memoization_leaves_board_unchanged() {
        let mut board = state("X...O....");
        let before = board.clone();
        let mut table = TranspositionTable::new();
        let mut stats = SearchStats::default();

        best_memoized(&mut board, &mut table, &mut stats);
        assert_eq!(board, before);
    }

    #[test]
    fn eager_stores_the_whole_orbit() {
        let mut board = state("X........");
        let mut table = TranspositionTable::new();
        let mut stats = SearchStats::default();
        best_symmetric(&mut board, CacheStrategy::Eager, &mut table, &mut stats);

        // the corner reply orbit is cached under every image key
        let reply = state("XO.......");
        assert!(table.get(reply.key()).is_some());
        for key in orbit_keys(&reply) {
            assert_eq!(table.get(key), table.get(reply.key()));
        }
    }

    #[test]
    fn lazy_probe_finds_rotated_entries() {
        let mut table = TranspositionTable::new();
        let original = state("X...O...O");
        table.put(original.key(), 1);

        let rotated = original.transform(&crate::symmetry::D4Transform {
            rotation: 90,
            reflection: false,
        });
        assert_eq!(probe(&rotated, CacheStrategy::Lazy, &table), Some(1));
        assert_eq!(probe(&rotated, CacheStrategy::Eager, &table), None);
    }
}
