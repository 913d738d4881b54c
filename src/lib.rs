//! Exact solver for Notakto (misère tic-tac-toe on one or more boards)
//!
//! This crate provides:
//! - Notakto rules: boards, move histories, misère terminal scoring
//! - A parity-aware move-ordering heuristic
//! - Minimax search with alpha-beta pruning and a board-keyed transposition table
//! - Per-move position analysis and a command-line front end

pub mod app;
pub mod cli;
pub mod error;
pub mod game;
pub mod search;
pub mod types;

pub use app::SearchConfig;
pub use error::{Error, Result};
pub use game::{BoardState, HistoryNode, MoveOrdering, Player};
pub use search::{CachePolicy, SearchContext, SearchOutcome, solve, solve_with};
pub use types::{Action, PLAYER_ONE_WINS, PLAYER_TWO_WINS, Value};
