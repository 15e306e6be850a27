//! Winning line tables and line analysis
//!
//! A win is `WIN_LENGTH` markers in a contiguous run, horizontally,
//! vertically, or diagonally. The tables below are fixed per board side;
//! `generate_win_lines` derives them from that rule and the tests pin the
//! two down to each other.

use std::collections::HashSet;

use crate::board::{Cell, Player};

/// Number of markers in a row required to win
pub const WIN_LENGTH: usize = 3;

/// A single winning line as board indices
pub type Line = [usize; WIN_LENGTH];

/// Winning lines on the 3x3 board
pub const WIN_LINES_3: [Line; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8], // main diagonal
    [2, 4, 6], // anti-diagonal
];

/// Winning lines on the 4x4 board (still three in a row)
pub const WIN_LINES_4: [Line; 24] = [
    [0, 1, 2],
    [1, 2, 3],
    [4, 5, 6],
    [5, 6, 7],
    [8, 9, 10],
    [9, 10, 11],
    [12, 13, 14],
    [13, 14, 15], // rows
    [0, 4, 8],
    [4, 8, 12],
    [1, 5, 9],
    [5, 9, 13],
    [2, 6, 10],
    [6, 10, 14],
    [3, 7, 11],
    [7, 11, 15], // columns
    [0, 5, 10],
    [1, 6, 11],
    [4, 9, 14],
    [5, 10, 15], // main-diagonal runs
    [2, 5, 8],
    [3, 6, 9],
    [6, 9, 12],
    [7, 10, 13], // anti-diagonal runs
];

/// Get the winning line table for a board side.
///
/// # Panics
///
/// Panics on an unsupported side. Board construction validates the side, so
/// this is unreachable for any `BoardState` built through the public API.
pub fn win_lines(side: usize) -> &'static [Line] {
    match side {
        3 => &WIN_LINES_3,
        4 => &WIN_LINES_4,
        _ => panic!("no win-line table for board side {side}"),
    }
}

/// Whether a board side has a win-line table
pub fn side_supported(side: usize) -> bool {
    matches!(side, 3 | 4)
}

/// Derive the winning lines for a `side` x `side` board from the rule:
/// every `WIN_LENGTH`-long contiguous run, horizontally, vertically, or
/// diagonally.
pub fn generate_win_lines(side: usize) -> Vec<Line> {
    // (row step, col step) for right, down, down-right, down-left
    const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

    let mut lines = Vec::new();
    for (dr, dc) in DIRECTIONS {
        for row in 0..side as isize {
            for col in 0..side as isize {
                let end_row = row + dr * (WIN_LENGTH as isize - 1);
                let end_col = col + dc * (WIN_LENGTH as isize - 1);
                if end_row < 0
                    || end_row >= side as isize
                    || end_col < 0
                    || end_col >= side as isize
                {
                    continue;
                }
                let mut line = [0usize; WIN_LENGTH];
                for (step, slot) in line.iter_mut().enumerate() {
                    let r = row + dr * step as isize;
                    let c = col + dc * step as isize;
                    *slot = (r * side as isize + c) as usize;
                }
                lines.push(line);
            }
        }
    }
    lines
}

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has three in a row
    pub fn has_won(cells: &[Cell], side: usize, player: Player) -> bool {
        let target = player.to_cell();
        win_lines(side)
            .iter()
            .any(|line| line.iter().all(|&idx| cells[idx] == target))
    }

    /// Find all positions that would immediately win for the player
    pub fn winning_moves(cells: &[Cell], side: usize, player: Player) -> HashSet<usize> {
        let mut moves = HashSet::new();
        for line in win_lines(side) {
            if let Some(pos) = Self::winning_move_in_line(cells, player, line) {
                moves.insert(pos);
            }
        }
        moves
    }

    /// Check if a player has an immediate winning move available
    pub fn has_immediate_win(cells: &[Cell], side: usize, player: Player) -> bool {
        win_lines(side)
            .iter()
            .any(|line| Self::winning_move_in_line(cells, player, line).is_some())
    }

    /// Find the winning move position in a specific line, if one exists
    fn winning_move_in_line(cells: &[Cell], player: Player, line: &Line) -> Option<usize> {
        let target = player.to_cell();
        let mut count = 0;
        let mut empty_pos = None;

        for &idx in line {
            match cells[idx] {
                Cell::Empty => {
                    if empty_pos.is_some() {
                        return None;
                    }
                    empty_pos = Some(idx);
                }
                c if c == target => count += 1,
                _ => return None, // opponent piece in line
            }
        }

        if count == WIN_LENGTH - 1 { empty_pos } else { None }
    }
}
