//! Per-move analysis of a position

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::alpha_beta::{AlphaBetaSearch, SearchContext, SearchOutcome};
use super::diagnostics::SearchStats;
use crate::{
    app::SearchConfig,
    game::{BoardKey, HistoryNode, LineAnalyzer, Player},
    types::{Action, Value},
};

/// Value of one legal action from the analyzed position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvaluation {
    pub action: usize,
    pub board: usize,
    pub cell: usize,
    pub value: Value,
    /// Whether the action completes a line and kills its board
    pub completes_line: bool,
}

/// Full analysis of a position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionReport {
    pub key: BoardKey,
    pub history: Vec<usize>,
    pub to_move: Player,
    pub value: Value,
    /// Actions in search order with their values
    pub moves: Vec<MoveEvaluation>,
    /// Actions that keep the mover's winning value
    pub best_moves: Vec<usize>,
    pub visited: u64,
    pub cached_positions: usize,
    pub stats: SearchStats,
}

/// Evaluate every legal action from `node`.
///
/// Children share one context so transpositions between sibling subtrees are
/// solved once. The node budget and time limit cover the whole analysis,
/// not each child separately.
///
/// # Errors
///
/// Returns error for an invalid configuration, a cache conflict, or
/// [`crate::Error::SearchAborted`] if a budget stops any child search.
pub fn analyze_moves(
    node: &HistoryNode,
    config: &SearchConfig,
) -> Result<PositionReport, crate::Error> {
    let mut engine = AlphaBetaSearch::new(config.clone())?;
    let mut ctx = SearchContext::new(config.record_histories);
    let mover = node.current_player();

    let mut moves = Vec::new();
    engine.begin(&ctx);
    for action in node.ordered_actions(config.ordering) {
        let child = node.update(action)?;
        let value = match engine.run_within(&child, &mut ctx)? {
            SearchOutcome::Solved(value) => value,
            SearchOutcome::Aborted(reason) => {
                return Err(crate::Error::SearchAborted {
                    visited: ctx.visits.count(),
                    reason: format!("{reason:?}"),
                });
            }
        };

        let typed = Action::new(action, node.num_boards())?;
        let losing = LineAnalyzer::losing_cells(&node.state().board(typed.board()).cells);
        moves.push(MoveEvaluation {
            action,
            board: typed.board(),
            cell: typed.cell(),
            value,
            completes_line: losing.contains(&typed.cell()),
        });
    }

    let value = match node.terminal_value() {
        Some(value) => value,
        None => {
            let values = moves.iter().map(|m| m.value);
            let best = match mover {
                Player::One => values.max(),
                Player::Two => values.min(),
            };
            best.ok_or_else(|| crate::Error::InvalidConfiguration {
                message: "non-terminal position produced no moves".to_string(),
            })?
        }
    };

    let mut best_moves: Vec<usize> = moves
        .iter()
        .filter(|m| m.value == value)
        .map(|m| m.action)
        .collect();
    best_moves.sort_unstable();

    debug!(
        history = ?node.actions(),
        value,
        best_moves = best_moves.len(),
        visited = ctx.visits.count(),
        "position analyzed"
    );

    Ok(PositionReport {
        key: node.key(),
        history: node.actions().to_vec(),
        to_move: mover,
        value,
        moves,
        best_moves,
        visited: ctx.visits.count(),
        cached_positions: ctx.table.len(),
        stats: ctx.stats,
    })
}
