//! D4 symmetry group operations for board canonicalization
//!
//! The eight transforms of the square (identity, three rotations, four
//! reflections) are parameterized as reflect-then-rotate, which enumerates
//! the same dihedral group as naming transpose/flip variants individually.

use serde::{Deserialize, Serialize};

use crate::board::{BoardState, Cell};

/// D4 symmetry transformation (dihedral group of the square)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    /// Rotation in degrees (0, 90, 180, 270)
    pub rotation: u16,
    /// Whether to apply a left-right reflection before rotating
    pub reflection: bool,
}

impl D4Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        D4Transform {
            rotation: 0,
            reflection: false,
        }
    }

    /// All 8 D4 transforms, identity first
    pub fn all() -> [D4Transform; 8] {
        let mut transforms = [D4Transform::identity(); 8];
        let mut i = 0;
        for rotation in [0, 90, 180, 270] {
            for reflection in [false, true] {
                transforms[i] = D4Transform {
                    rotation,
                    reflection,
                };
                i += 1;
            }
        }
        transforms
    }

    /// Apply the transform to a cell index on a `side` x `side` board.
    ///
    /// Reflection mirrors across the vertical axis first, then the rotation
    /// is applied clockwise.
    pub fn transform_position(&self, pos: usize, side: usize) -> usize {
        let (mut row, mut col) = (pos / side, pos % side);

        if self.reflection {
            col = side - 1 - col;
        }

        for _ in 0..(self.rotation / 90) {
            let new_row = col;
            let new_col = side - 1 - row;
            row = new_row;
            col = new_col;
        }

        row * side + col
    }

    /// Get the inverse transform.
    ///
    /// In reflect-then-rotate order every reflected element is an
    /// involution; a pure rotation inverts to the opposite rotation.
    pub fn inverse(&self) -> D4Transform {
        if self.reflection {
            *self
        } else {
            D4Transform {
                rotation: (360 - self.rotation) % 360,
                reflection: false,
            }
        }
    }

    /// Apply the inverse transform to a cell index
    pub fn apply_inverse_to_pos(&self, pos: usize, side: usize) -> usize {
        self.inverse().transform_position(pos, side)
    }
}

/// Result of canonicalization: the representative state, the transform that
/// produced it, and its packed key.
///
/// The search value is symmetry-invariant and needs no back-mapping; the
/// transform is kept for callers that must translate move coordinates
/// between the original and canonical frames.
#[derive(Debug, Clone)]
pub struct CanonicalForm {
    pub state: BoardState,
    pub transform: D4Transform,
    pub key: u64,
}

impl CanonicalForm {
    /// Map a move from original coordinates to canonical coordinates
    pub fn map_to_canonical(&self, pos: usize) -> usize {
        self.transform.transform_position(pos, self.state.side)
    }

    /// Map a move from canonical coordinates back to original coordinates
    pub fn map_from_canonical(&self, pos: usize) -> usize {
        self.transform.apply_inverse_to_pos(pos, self.state.side)
    }
}

/// Packed key of the board's image under a transform, computed without
/// materializing the transformed board: cell `j` of the image is cell
/// `t⁻¹(j)` of the original.
pub fn transformed_key(state: &BoardState, transform: &D4Transform) -> u64 {
    let inverse = transform.inverse();
    let mut key = 0u64;
    for j in 0..state.cells.len() {
        let src = inverse.transform_position(j, state.side);
        key = key * 3 + state.cells[src].digit();
    }
    key
}

/// Packed keys of all 8 images of the state, in `D4Transform::all()` order
pub fn orbit_keys(state: &BoardState) -> [u64; 8] {
    let mut keys = [0u64; 8];
    for (slot, transform) in keys.iter_mut().zip(D4Transform::all()) {
        *slot = transformed_key(state, &transform);
    }
    keys
}

impl BoardState {
    /// Apply a D4 transform to the board
    pub fn transform(&self, t: &D4Transform) -> Self {
        let mut cells = vec![Cell::Empty; self.cells.len()];
        for (i, &cell) in self.cells.iter().enumerate() {
            cells[t.transform_position(i, self.side)] = cell;
        }
        BoardState {
            side: self.side,
            cells,
            to_move: self.to_move,
        }
    }

    /// Canonical key: the minimum packed key over the 8 images.
    ///
    /// Constant on every symmetry orbit, so two states that are rotations
    /// or reflections of each other share it.
    pub fn canonical_key(&self) -> u64 {
        orbit_keys(self).into_iter().min().expect("orbit is non-empty")
    }

    /// Canonicalize and keep the producing transform.
    ///
    /// Ties between images with equal keys resolve to the first transform
    /// in `D4Transform::all()` order, identity first, so the result is
    /// deterministic.
    pub fn canonical_context(&self) -> CanonicalForm {
        let mut best_transform = D4Transform::identity();
        let mut best_key = self.key();

        for transform in D4Transform::all() {
            let key = transformed_key(self, &transform);
            if key < best_key {
                best_key = key;
                best_transform = transform;
            }
        }

        CanonicalForm {
            state: self.transform(&best_transform),
            transform: best_transform,
            key: best_key,
        }
    }

    /// The canonical (minimum-key) form under D4 symmetry
    pub fn canonical(&self) -> Self {
        self.canonical_context().state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Player;

    #[test]
    fn test_d4_has_8_distinct_elements() {
        for side in [3usize, 4] {
            let mut images = std::collections::HashSet::new();
            for t in D4Transform::all() {
                // a transform is determined by where it sends the index row
                let image: Vec<usize> = (0..side * side)
                    .map(|pos| t.transform_position(pos, side))
                    .collect();
                assert!(images.insert(image), "duplicate transform {t:?}");
            }
            assert_eq!(images.len(), 8);
        }
    }

    #[test]
    fn test_identity_transform() {
        let identity = D4Transform::identity();
        for side in [3usize, 4] {
            for pos in 0..side * side {
                assert_eq!(identity.transform_position(pos, side), pos);
            }
        }
    }

    #[test]
    fn test_transform_inverse_round_trip() {
        for side in [3usize, 4] {
            for t in D4Transform::all() {
                let inverse = t.inverse();
                for pos in 0..side * side {
                    let there = t.transform_position(pos, side);
                    let back = inverse.transform_position(there, side);
                    assert_eq!(back, pos, "{t:?} composed with its inverse on side {side}");
                }
            }
        }
    }

    #[test]
    fn test_rotation_moves_corner() {
        let rot90 = D4Transform {
            rotation: 90,
            reflection: false,
        };
        // top-left corner to top-right corner, clockwise
        assert_eq!(rot90.transform_position(0, 3), 2);
        assert_eq!(rot90.transform_position(0, 4), 3);
    }

    #[test]
    fn test_transformed_key_matches_materialized_transform() {
        let state = BoardState::from_string("XO..X...O").unwrap();
        for t in D4Transform::all() {
            assert_eq!(transformed_key(&state, &t), state.transform(&t).key());
        }
    }

    #[test]
    fn test_corner_openings_share_canonical_form() {
        let corners = [0usize, 2, 6, 8];
        let canonicals: Vec<BoardState> = corners
            .iter()
            .map(|&pos| BoardState::new(3).unwrap().make_move(pos).unwrap().canonical())
            .collect();
        for canonical in &canonicals {
            assert_eq!(canonical, &canonicals[0]);
        }
    }

    #[test]
    fn test_canonical_is_idempotent() {
        let mut state = BoardState::new(3).unwrap();
        state = state.make_move(0).unwrap();
        state = state.make_move(4).unwrap();
        state = state.make_move(8).unwrap();

        let once = state.canonical();
        assert_eq!(once.canonical(), once);
        assert_eq!(once.canonical_key(), state.canonical_key());
    }

    #[test]
    fn test_canonical_key_is_orbit_minimum() {
        let state = BoardState::from_string("X...O...........").unwrap();
        let keys = orbit_keys(&state);
        assert_eq!(state.canonical_key(), keys.into_iter().min().unwrap());
        assert!(keys.contains(&state.key()));
    }

    #[test]
    fn test_transform_preserves_turn_and_counts() {
        let state = BoardState::from_string("XO.X.....").unwrap();
        for t in D4Transform::all() {
            let image = state.transform(&t);
            assert_eq!(image.to_move, state.to_move);
            assert_eq!(image.occupied_count(), state.occupied_count());
        }
    }

    #[test]
    fn test_move_mapping_round_trip() {
        let mut state = BoardState::new(3).unwrap();
        state = state.make_move(2).unwrap();
        state = state.make_move(4).unwrap();

        let ctx = state.canonical_context();
        for pos in state.legal_moves() {
            let canonical_pos = ctx.map_to_canonical(pos);
            assert_eq!(ctx.map_from_canonical(canonical_pos), pos);
            assert!(
                ctx.state.is_empty(canonical_pos),
                "mapped move must stay legal"
            );
        }
    }

    #[test]
    fn test_center_opening_has_full_stabilizer() {
        let mut state = BoardState::new(3).unwrap();
        state = state.make_move(4).unwrap();
        assert_eq!(state.to_move, Player::O);

        for t in D4Transform::all() {
            assert_eq!(state.transform(&t), state);
        }
    }
}
