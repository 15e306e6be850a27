//! Board state validation logic

use crate::board::{BoardState, Player};

impl BoardState {
    /// Check whether the state is reachable under strict turn alternation.
    ///
    /// Either player may have opened, so the piece counts must differ by at
    /// most one in either direction, the recorded turn must match the
    /// counts, at most one player may hold a winning line, and a winner must
    /// have moved last.
    pub fn is_valid(&self) -> bool {
        let (x_count, o_count) = Self::count_pieces(&self.cells);

        if !(x_count == o_count || x_count == o_count + 1 || o_count == x_count + 1) {
            return false;
        }

        let diff = x_count as isize - o_count as isize;

        // the recorded turn must match the piece counts
        match self.to_move {
            Player::X => {
                if !(diff == 0 || diff == -1) {
                    return false;
                }
            }
            Player::O => {
                if !(diff == 0 || diff == 1) {
                    return false;
                }
            }
        }

        let x_wins = self.has_won(Player::X);
        let o_wins = self.has_won(Player::O);

        if x_wins && o_wins {
            return false;
        }

        // a winner moved last, so the turn belongs to their opponent
        if x_wins && self.to_move != Player::O {
            return false;
        }
        if o_wins && self.to_move != Player::X {
            return false;
        }

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Cell;

    #[test]
    fn empty_boards_are_valid() {
        assert!(BoardState::new(3).unwrap().is_valid());
        assert!(BoardState::new(4).unwrap().is_valid());
        assert!(BoardState::new_with_player(3, Player::O).unwrap().is_valid());
    }

    #[test]
    fn states_along_a_game_are_valid() {
        let mut state = BoardState::new(3).unwrap();
        for pos in [4, 0, 8, 1, 3] {
            assert!(state.is_valid());
            state = state.make_move(pos).unwrap();
        }
        assert!(state.is_valid());
    }

    #[test]
    fn unbalanced_counts_are_invalid() {
        let state = BoardState {
            side: 3,
            cells: vec![
                Cell::X,
                Cell::X,
                Cell::X,
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
            ],
            to_move: Player::O,
        };
        assert!(!state.is_valid());
    }

    #[test]
    fn double_winner_is_invalid() {
        let state = BoardState {
            side: 3,
            cells: vec![
                Cell::X,
                Cell::X,
                Cell::X,
                Cell::O,
                Cell::O,
                Cell::O,
                Cell::X,
                Cell::O,
                Cell::X,
            ],
            to_move: Player::O,
        };
        assert!(!state.is_valid());
    }

    #[test]
    fn winner_with_wrong_turn_is_invalid() {
        // X holds the top row but it is recorded as X's turn again
        let mut state = BoardState::new(3).unwrap();
        for pos in [0, 3, 1, 4, 2] {
            state = state.make_move(pos).unwrap();
        }
        assert!(state.is_valid());

        let mut tampered = state.clone();
        tampered.to_move = Player::X;
        assert!(!tampered.is_valid());
    }
}
