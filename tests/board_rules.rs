//! Game rule properties checked over every single-board configuration and
//! over random multi-board playouts.

use notakto::{
    BoardState, HistoryNode, PLAYER_ONE_WINS, PLAYER_TWO_WINS, Player,
    game::{Board, Cell, D4Transform, LineAnalyzer},
};
use rand::{SeedableRng, rngs::StdRng};

mod common;

fn board_from_mask(mask: u16) -> Board {
    let mut board = Board::new();
    for (cell, slot) in board.cells.iter_mut().enumerate() {
        if mask & (1 << cell) != 0 {
            *slot = Cell::Marked;
        }
    }
    board
}

#[test]
fn line_detection_is_symmetric() {
    for mask in 0..512u16 {
        let board = board_from_mask(mask);
        for t in D4Transform::all() {
            assert_eq!(
                board.transform(&t).is_winning(),
                board.is_winning(),
                "mask {mask:09b} under {t:?}"
            );
        }
    }
}

#[test]
fn losing_cells_complete_a_line() {
    for mask in 0..512u16 {
        let board = board_from_mask(mask);
        if board.is_winning() {
            continue;
        }
        for cell in LineAnalyzer::losing_cells(&board.cells) {
            let mut next = board;
            next.cells[cell] = Cell::Marked;
            assert!(next.is_winning(), "mask {mask:09b} cell {cell}");
        }
    }
}

#[test]
fn update_agrees_with_state_apply() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let path = common::random_playout(3, &mut rng);
        for pair in path.windows(2) {
            let (parent, child) = (&pair[0], &pair[1]);
            let action = *child.actions().last().unwrap();
            assert_eq!(child.state(), &parent.state().apply(action).unwrap());
        }
    }
}

#[test]
fn replaying_history_reproduces_state() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..20 {
        let path = common::random_playout(2, &mut rng);
        let last = path.last().unwrap();
        let replayed = HistoryNode::new(2, last.actions()).unwrap();
        assert_eq!(replayed.state(), last.state());
        assert_eq!(
            BoardState::from_key(last.key().as_str()).unwrap(),
            *last.state()
        );
    }
}

#[test]
fn playouts_end_with_every_board_dead() {
    let mut rng = StdRng::seed_from_u64(9);
    for _ in 0..30 {
        let path = common::random_playout(3, &mut rng);
        let last = path.last().unwrap();
        assert!(last.state().active_boards().iter().all(|&active| !active));

        let expected = match last.current_player() {
            Player::One => PLAYER_ONE_WINS,
            Player::Two => PLAYER_TWO_WINS,
        };
        assert_eq!(last.terminal_value(), Some(expected));
        assert!(path[..path.len() - 1].iter().all(|n| n.terminal_value().is_none()));
    }
}
