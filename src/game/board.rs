//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{lines::LineAnalyzer, symmetry::D4Transform};
use crate::types::{Action, CELLS_PER_BOARD};

/// A cell on a Notakto board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Marked,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '0',
            Cell::Marked => 'x',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '0' | '.' => Some(Cell::Empty),
            'x' | 'X' => Some(Cell::Marked),
            _ => None,
        }
    }
}

/// A single 3x3 board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    pub cells: [Cell; 9],
}

impl Board {
    /// Create an empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; 9],
        }
    }

    /// Whether a row, column or diagonal is fully marked
    pub fn is_winning(&self) -> bool {
        LineAnalyzer::has_line(&self.cells)
    }

    pub fn is_empty(&self, cell: usize) -> bool {
        self.cells[cell] == Cell::Empty
    }

    /// Empty cells, in index order
    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELLS_PER_BOARD).filter(|&i| self.is_empty(i)).collect()
    }

    pub fn marked_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == Cell::Marked).count()
    }

    /// Apply a D4 transform to the board
    pub fn transform(&self, t: &D4Transform) -> Self {
        Board {
            cells: t.apply_to_cells(&self.cells),
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let ch = match self.cells[row * 3 + col] {
                    Cell::Empty => '.',
                    Cell::Marked => 'X',
                };
                write!(f, "{ch}")?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Canonical, path-independent key for a board configuration.
///
/// The key is the concatenation of every board's nine cells in board order,
/// `0` for empty and `x` for marked, e.g. `"x000x0000000000000"` for two boards.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardKey(String);

impl BoardKey {
    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert the key into its inner String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for BoardKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PartialEq<&str> for BoardKey {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// All boards of a Notakto position
///
/// Values are never mutated in place; [`BoardState::apply`] returns a new state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    boards: Vec<Board>,
}

impl BoardState {
    /// Create `num_boards` empty boards.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardCount`] if `num_boards` is zero.
    pub fn new(num_boards: usize) -> Result<Self, crate::Error> {
        if num_boards == 0 {
            return Err(crate::Error::InvalidBoardCount { count: num_boards });
        }
        Ok(BoardState {
            boards: vec![Board::new(); num_boards],
        })
    }

    /// Parse a canonical key back into a board state.
    ///
    /// Whitespace is ignored; the remaining length must be a non-zero multiple of 9.
    ///
    /// # Errors
    ///
    /// Returns error if the length is wrong or any character is not a cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use notakto::game::BoardState;
    ///
    /// let state = BoardState::from_key("xxx000000 000000000").unwrap();
    /// assert_eq!(state.num_boards(), 2);
    /// assert!(state.is_board_winning(0));
    /// assert_eq!(state.active_boards(), vec![false, true]);
    /// ```
    pub fn from_key(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.is_empty() || !chars.len().is_multiple_of(CELLS_PER_BOARD) {
            let expected = chars.len().div_ceil(CELLS_PER_BOARD).max(1) * CELLS_PER_BOARD;
            return Err(crate::Error::InvalidKeyLength {
                expected,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut boards = Vec::with_capacity(chars.len() / CELLS_PER_BOARD);
        for (board_idx, chunk) in chars.chunks(CELLS_PER_BOARD).enumerate() {
            let mut board = Board::new();
            for (i, &c) in chunk.iter().enumerate() {
                board.cells[i] = Cell::from_char(c).ok_or_else(|| {
                    crate::Error::InvalidCellCharacter {
                        character: c,
                        position: board_idx * CELLS_PER_BOARD + i,
                        context: s.to_string(),
                    }
                })?;
            }
            boards.push(board);
        }

        Ok(BoardState { boards })
    }

    pub fn num_boards(&self) -> usize {
        self.boards.len()
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn board(&self, idx: usize) -> &Board {
        &self.boards[idx]
    }

    /// Total marked cells across all boards
    pub fn marked_count(&self) -> usize {
        self.boards.iter().map(Board::marked_count).sum()
    }

    /// Mark the cell targeted by `action`, returning a new state.
    ///
    /// Only range and occupancy are checked here; whether the board is still
    /// live is a rule enforced by [`crate::game::HistoryNode`].
    ///
    /// # Errors
    ///
    /// Returns error if the action is out of range or the cell is already marked.
    #[must_use = "apply returns a new board state; the original is unchanged"]
    pub fn apply(&self, action: usize) -> Result<BoardState, crate::Error> {
        let action = Action::new(action, self.num_boards())?;
        let (board, cell) = (action.board(), action.cell());
        if !self.boards[board].is_empty(cell) {
            return Err(crate::Error::CellOccupied { board, cell });
        }

        let mut next = self.clone();
        next.boards[board].cells[cell] = Cell::Marked;
        Ok(next)
    }

    /// Whether the given board contains a completed line
    pub fn is_board_winning(&self, board: usize) -> bool {
        self.boards[board].is_winning()
    }

    /// Per-board liveness: `true` iff the board has no completed line
    pub fn active_boards(&self) -> Vec<bool> {
        self.boards.iter().map(|b| !b.is_winning()).collect()
    }

    /// Canonical cache key: every board's cells concatenated in board order
    pub fn canonical_key(&self) -> BoardKey {
        let mut key = String::with_capacity(self.num_boards() * CELLS_PER_BOARD);
        for board in &self.boards {
            key.extend(board.cells.iter().map(|c| c.to_char()));
        }
        BoardKey(key)
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Boards side by side, separated by a gap
        let rendered: Vec<Vec<String>> = self
            .boards
            .iter()
            .map(|b| b.to_string().lines().map(str::to_string).collect())
            .collect();
        for row in 0..3 {
            let line: Vec<&str> = rendered.iter().map(|b| b[row].as_str()).collect();
            write!(f, "{}", line.join("   "))?;
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = BoardState::new(2).unwrap();
        assert_eq!(state.num_boards(), 2);
        assert_eq!(state.marked_count(), 0);
        assert_eq!(state.active_boards(), vec![true, true]);
    }

    #[test]
    fn test_zero_boards_rejected() {
        assert!(matches!(
            BoardState::new(0),
            Err(crate::Error::InvalidBoardCount { count: 0 })
        ));
    }

    #[test]
    fn test_apply_is_pure() {
        let state = BoardState::new(1).unwrap();
        let next = state.apply(4).unwrap();
        assert_eq!(state.marked_count(), 0);
        assert_eq!(next.marked_count(), 1);
        assert_eq!(next.board(0).cells[4], Cell::Marked);
    }

    #[test]
    fn test_apply_rejects_occupied_cell() {
        let state = BoardState::new(2).unwrap().apply(10).unwrap();
        let err = state.apply(10).unwrap_err();
        assert!(matches!(err, crate::Error::CellOccupied { board: 1, cell: 1 }));
    }

    #[test]
    fn test_apply_rejects_out_of_range() {
        let state = BoardState::new(1).unwrap();
        assert!(matches!(
            state.apply(9),
            Err(crate::Error::ActionOutOfRange { .. })
        ));
    }

    #[test]
    fn test_canonical_key() {
        let state = BoardState::new(2)
            .unwrap()
            .apply(0)
            .unwrap()
            .apply(13)
            .unwrap();
        assert_eq!(state.canonical_key(), "x000000000000x0000");
    }

    #[test]
    fn test_key_roundtrip() {
        let state = BoardState::new(3)
            .unwrap()
            .apply(2)
            .unwrap()
            .apply(17)
            .unwrap()
            .apply(22)
            .unwrap();
        let parsed = BoardState::from_key(state.canonical_key().as_str()).unwrap();
        assert_eq!(parsed, state);
    }

    #[test]
    fn test_from_key_rejects_bad_input() {
        assert!(matches!(
            BoardState::from_key("x0000"),
            Err(crate::Error::InvalidKeyLength { got: 5, .. })
        ));
        assert!(matches!(
            BoardState::from_key("x0000000o"),
            Err(crate::Error::InvalidCellCharacter {
                character: 'o',
                position: 8,
                ..
            })
        ));
        assert!(BoardState::from_key("").is_err());
    }

    #[test]
    fn test_board_winning_is_per_board() {
        let state = BoardState::from_key("xxx000000x0x000000").unwrap();
        assert!(state.is_board_winning(0));
        assert!(!state.is_board_winning(1));
        assert_eq!(state.active_boards(), vec![false, true]);
    }

    #[test]
    fn test_display() {
        let state = BoardState::from_key("x000x0000000000000").unwrap();
        let display = format!("{state}");
        assert!(display.contains("X..   ..."));
        assert!(display.contains(".X.   ..."));
    }
}
