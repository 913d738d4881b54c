//! Newtype wrappers for improved type safety and domain modeling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of cells on a single board.
pub const CELLS_PER_BOARD: usize = 9;

/// Game value in the solver's convention: positive favours player 1.
pub type Value = i32;

/// Value of a position won by player 1.
pub const PLAYER_ONE_WINS: Value = 1;

/// Value of a position won by player 2.
pub const PLAYER_TWO_WINS: Value = -1;

/// An action: the index of a cell across all boards (`board * 9 + cell`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Action(usize);

impl Action {
    /// Create a new action, validating it against the number of boards.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::ActionOutOfRange`] if `value >= 9 * num_boards`.
    ///
    /// # Examples
    ///
    /// ```
    /// use notakto::types::Action;
    ///
    /// let action = Action::new(13, 2).unwrap();
    /// assert_eq!(action.board(), 1);
    /// assert_eq!(action.cell(), 4);
    /// assert!(Action::new(18, 2).is_err());
    /// ```
    pub fn new(value: usize, num_boards: usize) -> Result<Self, crate::Error> {
        let limit = num_boards * CELLS_PER_BOARD;
        if value < limit {
            Ok(Action(value))
        } else {
            Err(crate::Error::ActionOutOfRange {
                action: value,
                max: limit.saturating_sub(1),
                boards: num_boards,
            })
        }
    }

    /// Build an action from a board index and a cell index on that board.
    pub(crate) fn from_parts(board: usize, cell: usize) -> Self {
        debug_assert!(cell < CELLS_PER_BOARD);
        Action(board * CELLS_PER_BOARD + cell)
    }

    /// Board this action plays on.
    pub fn board(&self) -> usize {
        self.0 / CELLS_PER_BOARD
    }

    /// Cell on the board (0-8).
    pub fn cell(&self) -> usize {
        self.0 % CELLS_PER_BOARD
    }

    /// Role of the targeted cell.
    pub fn class(&self) -> CellClass {
        CellClass::of(self.cell())
    }

    /// Get the inner value.
    pub fn value(&self) -> usize {
        self.0
    }
}

impl From<Action> for usize {
    fn from(action: Action) -> Self {
        action.0
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Geometric role of a cell on a 3x3 board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellClass {
    Center,
    Corner,
    Edge,
}

impl CellClass {
    /// Classify a cell index (0-8).
    pub fn of(cell: usize) -> Self {
        match cell {
            4 => CellClass::Center,
            0 | 2 | 6 | 8 => CellClass::Corner,
            _ => CellClass::Edge,
        }
    }
}

/// Render a game value as the player it favours.
pub fn describe_value(value: Value) -> &'static str {
    match value.signum() {
        1 => "player 1 wins",
        -1 => "player 2 wins",
        _ => "undecided",
    }
}
