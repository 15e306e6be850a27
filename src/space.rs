//! State-space enumeration under strict alternation
//!
//! Breadth-first walks from the empty board, used by the `count` driver
//! command and by tests exercising the symmetry properties over the full
//! reachable set. On the 3x3 board this reproduces the classic counts:
//! 5,478 reachable states, 765 up to D4 symmetry.

use std::collections::{HashSet, VecDeque};

use crate::board::BoardState;

/// Sizes of the reachable state space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceSummary {
    /// States reachable from the empty board, terminals included
    pub reachable: usize,
    /// Reachable states up to D4 symmetry
    pub canonical: usize,
}

/// Count the reachable state space without materializing it.
pub fn summarize(side: usize) -> crate::Result<SpaceSummary> {
    let mut reachable = 0usize;
    let mut canonical = HashSet::new();
    walk(side, |state| {
        reachable += 1;
        canonical.insert(state.canonical_key());
    })?;

    Ok(SpaceSummary {
        reachable,
        canonical: canonical.len(),
    })
}

/// All states reachable from the empty `side` x `side` board with X to
/// move, the empty board and terminal states included.
///
/// Collecting the side-4 space takes hundreds of megabytes; prefer
/// [`summarize`] when only the counts matter.
pub fn reachable_states(side: usize) -> crate::Result<Vec<BoardState>> {
    let mut states = Vec::new();
    walk(side, |state| states.push(state.clone()))?;
    Ok(states)
}

fn walk<F>(side: usize, mut visit: F) -> crate::Result<()>
where
    F: FnMut(&BoardState),
{
    let root = BoardState::new(side)?;
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    visited.insert(root.key());
    queue.push_back(root);

    while let Some(state) = queue.pop_front() {
        if !state.is_terminal() {
            for pos in state.empty_positions() {
                let next = state.make_move(pos)?;
                if visited.insert(next.key()) {
                    queue.push_back(next);
                }
            }
        }
        visit(&state);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classic_3x3_counts() {
        let summary = summarize(3).unwrap();
        assert_eq!(summary.reachable, 5478);
        assert_eq!(summary.canonical, 765);
    }

    #[test]
    fn enumeration_starts_at_the_root() {
        let states = reachable_states(3).unwrap();
        assert_eq!(states[0], BoardState::new(3).unwrap());
        assert_eq!(states.len(), 5478);
    }

    #[test]
    fn unsupported_side_is_rejected() {
        assert!(summarize(5).is_err());
    }
}
