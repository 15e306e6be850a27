//! Transposition table: packed board key to exact game value
//!
//! No eviction policy. The search space is finite, so unbounded growth
//! within one search session is accepted. The table is constructed by the
//! top-level caller and threaded as `&mut` through every recursive frame,
//! so all frames observe the same accumulated entries.

use std::collections::HashMap;

/// Cache of exact game values, keyed by [`BoardState::key`] (or a canonical
/// image of it when the symmetric search variant stores entries).
///
/// [`BoardState::key`]: crate::board::BoardState::key
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<u64, i32>,
}

impl TranspositionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previously computed value
    pub fn get(&self, key: u64) -> Option<i32> {
        self.entries.get(&key).copied()
    }

    /// Record a computed value
    pub fn put(&mut self, key: u64, value: i32) {
        self.entries.insert(key, value);
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_put_round_trip() {
        let mut table = TranspositionTable::new();
        assert!(table.is_empty());
        assert_eq!(table.get(42), None);

        table.put(42, -1);
        assert_eq!(table.get(42), Some(-1));
        assert_eq!(table.len(), 1);

        // overwriting is a plain replace
        table.put(42, 1);
        assert_eq!(table.get(42), Some(1));
        assert_eq!(table.len(), 1);
    }
}
