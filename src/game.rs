//! Notakto rules: boards, move histories and move ordering

pub mod board;
pub mod history;
pub mod lines;
pub mod ordering;
pub mod symmetry;

pub use board::{Board, BoardKey, BoardState, Cell};
pub use history::{HistoryNode, Player};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use ordering::MoveOrdering;
pub use symmetry::D4Transform;
