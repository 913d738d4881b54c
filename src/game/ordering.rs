//! Move ordering heuristics for the alpha-beta search
//!
//! Ordering never changes the value a search returns. It only changes how
//! early cutoffs happen and therefore how many positions get visited.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::types::{CELLS_PER_BOARD, CellClass};

/// How candidate actions are arranged before the search expands them
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum MoveOrdering {
    /// Bucket by cell class, bucket order chosen by board-count parity
    #[default]
    Parity,
    /// Plain board-then-cell enumeration
    BoardOrder,
}

impl MoveOrdering {
    /// Arrange `actions` (given in board-then-cell order) for `num_boards` boards.
    ///
    /// With [`MoveOrdering::Parity`], actions are split into center, corner and
    /// edge buckets, each keeping its input order. An even board count yields
    /// center, corner, edge; an odd count yields edge, corner, center.
    ///
    /// # Examples
    ///
    /// ```
    /// use notakto::game::MoveOrdering;
    ///
    /// let all: Vec<usize> = (0..9).collect();
    /// assert_eq!(
    ///     MoveOrdering::Parity.order(1, all.clone()),
    ///     vec![1, 3, 5, 7, 0, 2, 6, 8, 4]
    /// );
    /// assert_eq!(MoveOrdering::BoardOrder.order(1, all.clone()), all);
    /// ```
    pub fn order(self, num_boards: usize, actions: Vec<usize>) -> Vec<usize> {
        let Some(classes) = self.class_order(num_boards) else {
            return actions;
        };
        classes
            .iter()
            .flat_map(|&class| {
                actions
                    .iter()
                    .copied()
                    .filter(move |&action| CellClass::of(action % CELLS_PER_BOARD) == class)
            })
            .collect()
    }

    /// Class sequence emitted for `num_boards` boards
    pub fn class_order(self, num_boards: usize) -> Option<[CellClass; 3]> {
        match self {
            MoveOrdering::BoardOrder => None,
            MoveOrdering::Parity if num_boards.is_multiple_of(2) => {
                Some([CellClass::Center, CellClass::Corner, CellClass::Edge])
            }
            MoveOrdering::Parity => Some([CellClass::Edge, CellClass::Corner, CellClass::Center]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::HistoryNode;

    #[test]
    fn test_even_board_count_puts_center_first() {
        let node = HistoryNode::empty(2).unwrap();
        let ordered = node.ordered_actions(MoveOrdering::Parity);
        assert_eq!(&ordered[..2], &[4, 13]);
        assert_eq!(&ordered[2..10], &[0, 2, 6, 8, 9, 11, 15, 17]);
        assert_eq!(&ordered[10..], &[1, 3, 5, 7, 10, 12, 14, 16]);
    }

    #[test]
    fn test_odd_board_count_puts_center_last() {
        let node = HistoryNode::new(1, &[1]).unwrap();
        let ordered = node.ordered_actions(MoveOrdering::Parity);
        assert_eq!(ordered, vec![3, 5, 7, 0, 2, 6, 8, 4]);
    }

    #[test]
    fn test_ordering_is_a_permutation() {
        let node = HistoryNode::new(3, &[0, 13, 26]).unwrap();
        let mut ordered = node.ordered_actions(MoveOrdering::Parity);
        ordered.sort_unstable();
        assert_eq!(ordered, node.valid_actions());
    }

    #[test]
    fn test_class_order() {
        assert_eq!(
            MoveOrdering::Parity.class_order(2),
            Some([CellClass::Center, CellClass::Corner, CellClass::Edge])
        );
        assert_eq!(
            MoveOrdering::Parity.class_order(3),
            Some([CellClass::Edge, CellClass::Corner, CellClass::Center])
        );
        assert_eq!(MoveOrdering::BoardOrder.class_order(2), None);
    }
}
