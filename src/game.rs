//! High-level game management for the driver

use serde::{Deserialize, Serialize};

use crate::board::{BoardState, Player};

/// A move in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub position: usize,
    pub player: Player,
}

/// Outcome of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// A complete game with history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub initial: BoardState,
    pub current: BoardState,
    pub moves: Vec<Move>,
    pub outcome: Option<GameOutcome>,
}

impl Game {
    /// Start a game from an initial position
    pub fn new(initial: BoardState) -> Self {
        Game {
            current: initial.clone(),
            initial,
            moves: Vec::new(),
            outcome: None,
        }
    }

    /// Play a move for the player to move
    ///
    /// # Errors
    ///
    /// Returns [`Error::GameOver`] once an outcome is recorded, or
    /// [`Error::InvalidMove`] for an occupied or out-of-range position.
    ///
    /// [`Error::GameOver`]: crate::Error::GameOver
    /// [`Error::InvalidMove`]: crate::Error::InvalidMove
    pub fn play(&mut self, position: usize) -> crate::Result<()> {
        if self.outcome.is_some() {
            return Err(crate::Error::GameOver);
        }

        let player = self.current.to_move;
        self.current = self.current.make_move(position)?;
        self.moves.push(Move { position, player });

        if self.current.is_terminal() {
            self.outcome = Some(match self.current.winner() {
                Some(winner) => GameOutcome::Win(winner),
                None => GameOutcome::Draw,
            });
        }

        Ok(())
    }

    /// The move history rendered as "0 --> 4 --> 8"
    pub fn history_line(&self) -> String {
        self.moves
            .iter()
            .map(|m| m.position.to_string())
            .collect::<Vec<_>>()
            .join(" --> ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn game_records_moves_and_outcome() {
        let mut game = Game::new(BoardState::new(3).unwrap());
        for pos in [0, 3, 1, 4, 2] {
            game.play(pos).unwrap();
        }

        assert_eq!(game.outcome, Some(GameOutcome::Win(Player::X)));
        assert_eq!(game.moves.len(), 5);
        assert_eq!(game.moves[0].player, Player::X);
        assert_eq!(game.moves[1].player, Player::O);
        assert_eq!(game.history_line(), "0 --> 3 --> 1 --> 4 --> 2");
    }

    #[test]
    fn play_after_game_over_is_rejected() {
        let mut game = Game::new(BoardState::new(3).unwrap());
        for pos in [0, 3, 1, 4, 2] {
            game.play(pos).unwrap();
        }
        assert!(matches!(game.play(5), Err(crate::Error::GameOver)));
    }

    #[test]
    fn occupied_position_is_rejected() {
        let mut game = Game::new(BoardState::new(3).unwrap());
        game.play(4).unwrap();
        assert!(matches!(
            game.play(4),
            Err(crate::Error::InvalidMove { position: 4 })
        ));
    }
}
