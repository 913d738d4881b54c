//! Game-value search: alpha-beta engine, transposition table and diagnostics

pub mod alpha_beta;
pub mod analysis;
pub mod diagnostics;
pub mod transposition;

pub use alpha_beta::{
    AbortReason, AlphaBetaSearch, SearchContext, SearchOutcome, solve, solve_with,
};
pub use analysis::{MoveEvaluation, PositionReport, analyze_moves};
pub use diagnostics::{SearchStats, VisitLog};
pub use transposition::{CachePolicy, TranspositionTable};
