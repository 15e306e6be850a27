//! Board state representation and rules

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::lines::{self, LineAnalyzer};

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// Base-3 digit used by the packed board key
    pub(crate) fn digit(self) -> u64 {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Player::X => 'X',
            Player::O => 'O',
        }
    }
}

/// Complete board state: cells in row-major order plus whose turn it is.
///
/// The side is a construction-time configuration constant validated against
/// the supported win-line tables; it is never a runtime search parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    pub side: usize,
    pub cells: Vec<Cell>,
    pub to_move: Player,
}

impl BoardState {
    /// Create a new empty board with X to move
    pub fn new(side: usize) -> crate::Result<Self> {
        Self::new_with_player(side, Player::X)
    }

    /// Create a new empty board with a specified player to move first
    pub fn new_with_player(side: usize, first_player: Player) -> crate::Result<Self> {
        if !lines::side_supported(side) {
            return Err(crate::Error::UnsupportedBoardSide { side });
        }
        Ok(BoardState {
            side,
            cells: vec![Cell::Empty; side * side],
            to_move: first_player,
        })
    }

    /// Create a board from a string representation.
    ///
    /// Accepts '.' or ' ' for empty cells and an optional `_X`/`_O` suffix
    /// naming the player to move. Line breaks are ignored so multi-line
    /// renderings round-trip; other whitespace is significant because a
    /// space is an empty cell. The side is inferred from the cell count
    /// (9 or 16). Without a suffix the player is determined from the piece
    /// counts, defaulting to X when the counts are equal.
    ///
    /// # Errors
    ///
    /// Returns an error if the cell count is not 9 or 16, a character is not
    /// a valid cell, the piece counts differ by more than one, or a provided
    /// suffix conflicts with the counts.
    pub fn from_string(s: &str) -> crate::Result<Self> {
        let cleaned: String = s.chars().filter(|&c| c != '\n' && c != '\r').collect();
        let (board_part, specified_turn) = Self::split_board_and_turn(&cleaned)?;

        let chars: Vec<char> = board_part.chars().collect();
        let side = match chars.len() {
            9 => 3,
            16 => 4,
            got => {
                return Err(crate::Error::InvalidBoardLength {
                    got,
                    context: s.to_string(),
                });
            }
        };

        let mut cells = vec![Cell::Empty; chars.len()];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        let (x_count, o_count) = Self::count_pieces(&cells);
        let to_move = match specified_turn {
            Some(turn) => {
                Self::ensure_turn_consistent_with_counts(x_count, o_count, turn, s)?;
                turn
            }
            None => Self::determine_turn_from_counts(x_count, o_count)?,
        };

        Ok(BoardState {
            side,
            cells,
            to_move,
        })
    }

    fn split_board_and_turn(cleaned: &str) -> crate::Result<(&str, Option<Player>)> {
        match cleaned.find('_') {
            Some(idx) => {
                let suffix = &cleaned[idx + 1..];
                let player = match suffix {
                    "X" => Player::X,
                    "O" => Player::O,
                    _ => {
                        return Err(crate::Error::InvalidPlayerString {
                            player: suffix.to_string(),
                            context: cleaned.to_string(),
                        });
                    }
                };
                Ok((&cleaned[..idx], Some(player)))
            }
            None => Ok((cleaned, None)),
        }
    }

    pub(crate) fn count_pieces(cells: &[Cell]) -> (usize, usize) {
        let mut x = 0;
        let mut o = 0;
        for cell in cells {
            match cell {
                Cell::X => x += 1,
                Cell::O => o += 1,
                Cell::Empty => {}
            }
        }
        (x, o)
    }

    fn determine_turn_from_counts(x_count: usize, o_count: usize) -> crate::Result<Player> {
        if x_count == o_count {
            Ok(Player::X)
        } else if x_count == o_count + 1 {
            Ok(Player::O)
        } else if o_count == x_count + 1 {
            Ok(Player::X)
        } else {
            Err(crate::Error::InvalidPieceCounts { x_count, o_count })
        }
    }

    fn ensure_turn_consistent_with_counts(
        x_count: usize,
        o_count: usize,
        player: Player,
        context: &str,
    ) -> crate::Result<()> {
        let valid = match player {
            Player::X => x_count == o_count || o_count == x_count + 1,
            Player::O => x_count == o_count || x_count == o_count + 1,
        };

        if valid {
            Ok(())
        } else {
            Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "piece counts (X={}, O={}) are inconsistent with {} to move in '{}'",
                    x_count,
                    o_count,
                    player.to_char(),
                    context
                ),
            })
        }
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Count the occupied cells
    pub fn occupied_count(&self) -> usize {
        let (x, o) = Self::count_pieces(&self.cells);
        x + o
    }

    /// Get cell at a position
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// All empty positions, in ascending index order.
    ///
    /// The enumeration order is the tie-break order of the search: the first
    /// move attaining the best value wins, so this must stay deterministic.
    pub fn empty_positions(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Legal moves in this position (empty cells while the game is live)
    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.empty_positions()
    }

    /// Make a move and return the new board state
    #[must_use = "make_move returns a new board state; the original is unchanged"]
    pub fn make_move(&self, pos: usize) -> crate::Result<BoardState> {
        if pos >= self.cells.len() || !self.is_empty(pos) {
            return Err(crate::Error::InvalidMove { position: pos });
        }

        let mut next = self.clone();
        next.apply_move(pos);
        Ok(next)
    }

    /// Place the mover's marker in place and pass the turn.
    ///
    /// Engine-facing counterpart of [`make_move`]: each recursive frame
    /// applies a move before recursing and undoes it with [`undo_move`] on
    /// every exit path. Legality is the caller's contract (the search only
    /// feeds positions from `empty_positions`).
    ///
    /// [`make_move`]: Self::make_move
    /// [`undo_move`]: Self::undo_move
    pub fn apply_move(&mut self, pos: usize) {
        debug_assert!(self.cells[pos] == Cell::Empty, "apply on occupied cell");
        self.cells[pos] = self.to_move.to_cell();
        self.to_move = self.to_move.opponent();
    }

    /// Reverse [`apply_move`]: clear the cell and hand the turn back.
    ///
    /// [`apply_move`]: Self::apply_move
    pub fn undo_move(&mut self, pos: usize) {
        debug_assert!(self.cells[pos] != Cell::Empty, "undo on empty cell");
        self.cells[pos] = Cell::Empty;
        self.to_move = self.to_move.opponent();
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        LineAnalyzer::has_won(&self.cells, self.side, player)
    }

    /// Check if the game is over (win or full board)
    pub fn is_terminal(&self) -> bool {
        self.has_won(Player::X) || self.has_won(Player::O) || !self.cells.contains(&Cell::Empty)
    }

    /// Get the winner if there is one
    pub fn winner(&self) -> Option<Player> {
        if self.has_won(Player::X) {
            Some(Player::X)
        } else if self.has_won(Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }

    /// Terminal payoff from `player`'s perspective: +1 win, -1 loss, 0 draw.
    ///
    /// Only meaningful on terminal states; the search always checks
    /// [`is_terminal`] first.
    ///
    /// [`is_terminal`]: Self::is_terminal
    pub fn payoff(&self, player: Player) -> i32 {
        debug_assert!(self.is_terminal(), "payoff queried on a live position");
        if self.has_won(player) {
            1
        } else if self.has_won(player.opponent()) {
            -1
        } else {
            0
        }
    }

    /// Check if the player to move has an immediate winning move
    pub fn has_immediate_win(&self) -> bool {
        LineAnalyzer::has_immediate_win(&self.cells, self.side, self.to_move)
    }

    /// Human-readable label, e.g. `"X...O...._X"`
    pub fn encode(&self) -> String {
        format!(
            "{}_{}",
            self.cells.iter().map(|&c| c.to_char()).collect::<String>(),
            self.to_move.to_char()
        )
    }

    /// Packed base-3 key over the cells in row-major order.
    ///
    /// Injective for a fixed board side, and cheap to hash and compare;
    /// this is the transposition-table key. The player to move is omitted:
    /// within one search session the turn is a function of the piece counts.
    pub fn key(&self) -> u64 {
        self.cells.iter().fold(0u64, |acc, &c| acc * 3 + c.digit())
    }
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState {
            side: 3,
            cells: vec![Cell::Empty; 9],
            to_move: Player::X,
        }
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1).is_multiple_of(self.side) && i + 1 < self.cells.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
