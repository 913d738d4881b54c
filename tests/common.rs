//! Common test utilities for the notakto test suite.
//!
//! Provides an independent reference solver and random position generation.

use std::collections::HashMap;

use notakto::{HistoryNode, PLAYER_ONE_WINS, PLAYER_TWO_WINS, Player, Value};
use rand::{Rng, rngs::StdRng, seq::IndexedRandom};

/// Plain minimax without pruning, memoized on (key, player to move).
///
/// Serves as ground truth for the alpha-beta engine.
pub fn reference_value(node: &HistoryNode) -> Value {
    let mut memo = HashMap::new();
    minimax(node, &mut memo)
}

fn minimax(node: &HistoryNode, memo: &mut HashMap<(String, Player), Value>) -> Value {
    let mover = node.current_player();
    let key = (node.key().into_inner(), mover);
    if let Some(&value) = memo.get(&key) {
        return value;
    }

    let actions = node.valid_actions();
    let value = if actions.is_empty() {
        match mover {
            Player::One => PLAYER_ONE_WINS,
            Player::Two => PLAYER_TWO_WINS,
        }
    } else {
        let values = actions.into_iter().map(|action| {
            let child = node.update(action).expect("valid action");
            minimax(&child, memo)
        });
        let best = match mover {
            Player::One => values.max(),
            Player::Two => values.min(),
        };
        best.expect("non-terminal node has actions")
    };

    memo.insert(key, value);
    value
}

/// Play random legal moves from the empty position until at most
/// `max_open` legal actions remain or the game ends.
pub fn random_position(num_boards: usize, max_open: usize, rng: &mut StdRng) -> HistoryNode {
    let mut node = HistoryNode::empty(num_boards).expect("board count is positive");
    loop {
        let actions = node.valid_actions();
        if actions.len() <= max_open {
            return node;
        }
        let &action = actions.choose(rng).expect("actions is non-empty");
        node = node.update(action).expect("valid action");
    }
}

/// Play a uniformly random game to the end, returning every node on the way.
pub fn random_playout(num_boards: usize, rng: &mut StdRng) -> Vec<HistoryNode> {
    let mut node = HistoryNode::empty(num_boards).expect("board count is positive");
    let mut path = vec![node.clone()];
    while !node.is_terminal() {
        let actions = node.valid_actions();
        let action = actions[rng.random_range(0..actions.len())];
        node = node.update(action).expect("valid action");
        path.push(node.clone());
    }
    path
}
