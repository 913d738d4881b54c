//! Move histories and the positions they lead to

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    board::{BoardKey, BoardState},
    ordering::MoveOrdering,
};
use crate::types::{Action, PLAYER_ONE_WINS, PLAYER_TWO_WINS, Value};

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Player to move after `moves_played` actions
    pub fn to_move_after(moves_played: usize) -> Player {
        if moves_played.is_multiple_of(2) {
            Player::One
        } else {
            Player::Two
        }
    }

    /// Numeric id (1 or 2)
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player {}", self.number())
    }
}

/// The path-identified view of a position
///
/// Holds the actions played since the empty position together with the
/// [`BoardState`] they produce. Distinct histories may share a board state;
/// [`HistoryNode::key`] is what the search memoizes on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryNode {
    actions: Vec<usize>,
    state: BoardState,
}

impl HistoryNode {
    /// The empty position on `num_boards` boards.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidBoardCount`] if `num_boards` is zero.
    pub fn empty(num_boards: usize) -> Result<Self, crate::Error> {
        Ok(HistoryNode {
            actions: Vec::new(),
            state: BoardState::new(num_boards)?,
        })
    }

    /// Replay `actions` from the empty position.
    ///
    /// Every action must be legal when played: in range, on an empty cell,
    /// and on a board without a completed line.
    ///
    /// # Errors
    ///
    /// Returns the first rule violation encountered during replay.
    ///
    /// # Examples
    ///
    /// ```
    /// use notakto::game::{HistoryNode, Player};
    ///
    /// let node = HistoryNode::new(2, &[4, 13]).unwrap();
    /// assert_eq!(node.current_player(), Player::One);
    /// assert_eq!(node.state().marked_count(), 2);
    /// assert!(HistoryNode::new(1, &[4, 4]).is_err());
    /// ```
    pub fn new(num_boards: usize, actions: &[usize]) -> Result<Self, crate::Error> {
        let mut node = Self::empty(num_boards)?;
        for &action in actions {
            node = node.update(action)?;
        }
        Ok(node)
    }

    /// Parse a comma or whitespace separated action list.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidActionList`] if any token is not a number.
    pub fn parse_actions(input: &str) -> Result<Vec<usize>, crate::Error> {
        input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<usize>()
                    .map_err(|e| crate::Error::InvalidActionList {
                        input: input.to_string(),
                        reason: format!("'{token}': {e}"),
                    })
            })
            .collect()
    }

    pub fn actions(&self) -> &[usize] {
        &self.actions
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn num_boards(&self) -> usize {
        self.state.num_boards()
    }

    /// Canonical key of the current board configuration
    pub fn key(&self) -> BoardKey {
        self.state.canonical_key()
    }

    /// Player about to move
    pub fn current_player(&self) -> Player {
        Player::to_move_after(self.actions.len())
    }

    /// Legal actions in board-then-cell order
    ///
    /// Only empty cells on boards without a completed line are offered. A
    /// full board with no line simply contributes nothing.
    pub fn valid_actions(&self) -> Vec<usize> {
        self.state
            .boards()
            .iter()
            .enumerate()
            .filter(|(_, board)| !board.is_winning())
            .flat_map(|(board_idx, board)| {
                board
                    .empty_cells()
                    .into_iter()
                    .map(move |cell| Action::from_parts(board_idx, cell).value())
            })
            .collect()
    }

    /// Legal actions arranged by a move-ordering policy
    pub fn ordered_actions(&self, ordering: MoveOrdering) -> Vec<usize> {
        ordering.order(self.num_boards(), self.valid_actions())
    }

    pub fn is_terminal(&self) -> bool {
        self.valid_actions().is_empty()
    }

    /// Misère value of a terminal position, `None` if play continues
    ///
    /// The player facing a position with no legal move is the winner.
    pub fn terminal_value(&self) -> Option<Value> {
        if !self.is_terminal() {
            return None;
        }
        Some(match self.current_player() {
            Player::One => PLAYER_ONE_WINS,
            Player::Two => PLAYER_TWO_WINS,
        })
    }

    /// Successor node with `action` appended.
    ///
    /// # Errors
    ///
    /// Returns error if the action is out of range, targets a marked cell, or
    /// targets a board that already has a completed line.
    #[must_use = "update returns a new node; the original is unchanged"]
    pub fn update(&self, action: usize) -> Result<HistoryNode, crate::Error> {
        let checked = Action::new(action, self.num_boards())?;
        if self.state.is_board_winning(checked.board()) {
            return Err(crate::Error::DeadBoard {
                board: checked.board(),
            });
        }

        let state = self.state.apply(action)?;
        let mut actions = Vec::with_capacity(self.actions.len() + 1);
        actions.extend_from_slice(&self.actions);
        actions.push(action);
        Ok(HistoryNode { actions, state })
    }
}

impl fmt::Display for HistoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.state)?;
        write!(f, "{} to move after {:?}", self.current_player(), self.actions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_alternation() {
        let mut node = HistoryNode::empty(1).unwrap();
        assert_eq!(node.current_player(), Player::One);

        node = node.update(0).unwrap();
        assert_eq!(node.current_player(), Player::Two);

        node = node.update(1).unwrap();
        assert_eq!(node.current_player(), Player::One);
    }

    #[test]
    fn test_update_does_not_mutate() {
        let node = HistoryNode::empty(2).unwrap();
        let next = node.update(13).unwrap();
        assert!(node.actions().is_empty());
        assert_eq!(next.actions(), &[13]);
        assert_eq!(node.state().marked_count(), 0);
    }

    #[test]
    fn test_dead_board_offers_no_actions() {
        let node = HistoryNode::new(2, &[0, 1, 2]).unwrap();
        assert!(node.state().is_board_winning(0));
        let actions = node.valid_actions();
        assert_eq!(actions, (9..18).collect::<Vec<_>>());
    }

    #[test]
    fn test_update_rejects_dead_board() {
        let node = HistoryNode::new(2, &[0, 1, 2]).unwrap();
        assert!(matches!(
            node.update(5),
            Err(crate::Error::DeadBoard { board: 0 })
        ));
    }

    #[test]
    fn test_single_dead_board_is_terminal_for_player_two() {
        // Odd-length history completing the only board: player 2 is stuck.
        let node = HistoryNode::new(1, &[0, 1, 2]).unwrap();
        assert!(node.is_terminal());
        assert_eq!(node.current_player(), Player::Two);
        assert_eq!(node.terminal_value(), Some(PLAYER_TWO_WINS));
    }

    #[test]
    fn test_terminal_value_for_player_one() {
        let node = HistoryNode::new(1, &[0, 4, 1, 2]).unwrap();
        assert!(node.state().is_board_winning(0));
        assert_eq!(node.current_player(), Player::One);
        assert_eq!(node.terminal_value(), Some(PLAYER_ONE_WINS));
    }

    #[test]
    fn test_non_terminal_has_no_value() {
        let node = HistoryNode::empty(1).unwrap();
        assert_eq!(node.terminal_value(), None);
        assert_eq!(node.valid_actions().len(), 9);
    }

    #[test]
    fn test_parse_actions() {
        assert_eq!(
            HistoryNode::parse_actions("4, 13 0").unwrap(),
            vec![4, 13, 0]
        );
        assert!(HistoryNode::parse_actions("").unwrap().is_empty());
        assert!(matches!(
            HistoryNode::parse_actions("4,a"),
            Err(crate::Error::InvalidActionList { .. })
        ));
    }
}
