//! Minimax search with alpha-beta pruning and a board-keyed transposition table
//!
//! The search is a plain recursive depth-first traversal. All mutable state
//! (table, visit log, counters) lives in a [`SearchContext`] owned by the
//! caller, so independent searches never share results unless the caller
//! hands them the same context.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use super::{
    diagnostics::{SearchStats, VisitLog},
    transposition::TranspositionTable,
};
use crate::{
    app::SearchConfig,
    game::{HistoryNode, Player},
    types::{Value, describe_value},
};

/// How often (in expanded positions) the wall clock is consulted
const CLOCK_CHECK_INTERVAL: u64 = 1024;

/// Mutable state shared by every call of one or more searches
#[derive(Debug, Clone, Default)]
pub struct SearchContext {
    pub table: TranspositionTable,
    pub visits: VisitLog,
    pub stats: SearchStats,
}

impl SearchContext {
    pub fn new(record_histories: bool) -> Self {
        SearchContext {
            table: TranspositionTable::new(),
            visits: VisitLog::new(record_histories),
            stats: SearchStats::default(),
        }
    }

    /// Drop all cached values and diagnostics
    pub fn reset(&mut self) {
        self.table.clear();
        self.visits.clear();
        self.stats = SearchStats::default();
    }
}

/// Why a search stopped before producing a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbortReason {
    NodeBudget { limit: u64 },
    TimeLimit { limit_ms: u64 },
}

/// Result of a root search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    Solved(Value),
    Aborted(AbortReason),
}

impl SearchOutcome {
    pub fn value(&self) -> Option<Value> {
        match self {
            SearchOutcome::Solved(value) => Some(*value),
            SearchOutcome::Aborted(_) => None,
        }
    }
}

/// Alpha-beta engine configured by a [`SearchConfig`]
#[derive(Debug, Clone)]
pub struct AlphaBetaSearch {
    config: SearchConfig,
    started: Option<Instant>,
    visits_at_start: u64,
    aborted: Option<AbortReason>,
}

impl AlphaBetaSearch {
    /// Create an engine.
    ///
    /// # Errors
    ///
    /// Returns error if the configuration does not validate.
    pub fn new(config: SearchConfig) -> Result<Self, crate::Error> {
        config.validate()?;
        Ok(AlphaBetaSearch {
            config,
            started: None,
            visits_at_start: 0,
            aborted: None,
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Search `node` with an unbounded window.
    ///
    /// Values are always from player 1's point of view, so player 1 is the
    /// maximizing side whichever player is to move at the root.
    ///
    /// # Errors
    ///
    /// Returns error if the node was built for a different board count, or
    /// if the transposition table reports a conflicting store.
    pub fn run(
        &mut self,
        node: &HistoryNode,
        ctx: &mut SearchContext,
    ) -> Result<SearchOutcome, crate::Error> {
        self.begin(ctx);
        self.run_within(node, ctx)
    }

    /// Start the clock and the node budget from the current state of `ctx`.
    pub fn begin(&mut self, ctx: &SearchContext) {
        self.started = Some(Instant::now());
        self.aborted = None;
        self.visits_at_start = ctx.visits.count();
    }

    /// Like [`AlphaBetaSearch::run`], but charged against the budget opened
    /// by the last [`AlphaBetaSearch::begin`]. Several root searches can
    /// share one node budget and one deadline this way.
    ///
    /// # Errors
    ///
    /// Same as [`AlphaBetaSearch::run`].
    pub fn run_within(
        &mut self,
        node: &HistoryNode,
        ctx: &mut SearchContext,
    ) -> Result<SearchOutcome, crate::Error> {
        if node.num_boards() != self.config.num_boards {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "position has {} board(s) but the search is configured for {}",
                    node.num_boards(),
                    self.config.num_boards
                ),
            });
        }

        let visits_before = ctx.visits.count();
        let maximizing = node.current_player() == Player::One;
        debug!(
            boards = self.config.num_boards,
            history = ?node.actions(),
            ordering = ?self.config.ordering,
            policy = ?self.config.cache_policy,
            "starting alpha-beta search"
        );

        let outcome = match self.search(ctx, node, Value::MIN, Value::MAX, maximizing)? {
            Some(value) => SearchOutcome::Solved(value),
            None => {
                let reason = self
                    .aborted
                    .unwrap_or(AbortReason::NodeBudget { limit: 0 });
                warn!(?reason, visited = ctx.visits.count() - visits_before, "search aborted");
                SearchOutcome::Aborted(reason)
            }
        };

        if let SearchOutcome::Solved(value) = outcome {
            debug!(
                value,
                outcome = describe_value(value),
                visited = ctx.visits.count() - visits_before,
                cached = ctx.table.len(),
                cache_hits = ctx.stats.cache_hits,
                cutoffs = ctx.stats.cutoffs,
                "search finished"
            );
        }
        Ok(outcome)
    }

    /// One recursive call. `None` means the search was aborted.
    fn search(
        &mut self,
        ctx: &mut SearchContext,
        node: &HistoryNode,
        mut alpha: Value,
        mut beta: Value,
        maximizing: bool,
    ) -> Result<Option<Value>, crate::Error> {
        let key = node.key();
        if let Some(value) = ctx.table.lookup(&key) {
            ctx.stats.cache_hits += 1;
            return Ok(Some(value));
        }

        if self.budget_exhausted(ctx) {
            return Ok(None);
        }

        ctx.visits.record(node.actions());
        ctx.stats.max_depth = ctx.stats.max_depth.max(node.actions().len());

        if let Some(value) = node.terminal_value() {
            ctx.stats.terminal_nodes += 1;
            return Ok(Some(value));
        }

        let (alpha_in, beta_in) = (alpha, beta);
        let mut best = if maximizing { Value::MIN } else { Value::MAX };

        for action in node.ordered_actions(self.config.ordering) {
            let child = node.update(action)?;
            let Some(value) = self.search(ctx, &child, alpha, beta, !maximizing)? else {
                return Ok(None);
            };

            if maximizing {
                best = best.max(value);
                alpha = alpha.max(best);
            } else {
                best = best.min(value);
                beta = beta.min(best);
            }

            if alpha >= beta {
                ctx.stats.cutoffs += 1;
                trace!(history = ?node.actions(), action, best, "cutoff");
                break;
            }
        }

        if self.config.cache_policy.admits(best, alpha_in, beta_in) {
            ctx.table.store(key, best)?;
            ctx.stats.stores += 1;
        } else {
            ctx.stats.skipped_stores += 1;
        }
        Ok(Some(best))
    }

    fn budget_exhausted(&mut self, ctx: &SearchContext) -> bool {
        if self.aborted.is_some() {
            return true;
        }

        let expanded = ctx.visits.count() - self.visits_at_start;
        if let Some(limit) = self.config.node_budget
            && expanded >= limit
        {
            self.aborted = Some(AbortReason::NodeBudget { limit });
            return true;
        }

        if let (Some(limit), Some(started)) = (self.config.time_limit(), self.started)
            && expanded.is_multiple_of(CLOCK_CHECK_INTERVAL)
            && started.elapsed() >= limit
        {
            self.aborted = Some(AbortReason::TimeLimit {
                limit_ms: self.config.time_limit_ms.unwrap_or_default(),
            });
            return true;
        }

        false
    }
}

/// Solve a position from `history` on `num_boards` boards with default settings.
///
/// Returns the game value and every history expanded during the search, in
/// visit order. A fresh context is used, so repeated calls are independent.
///
/// # Errors
///
/// Returns error if the board count is zero or the history is not legal.
///
/// # Examples
///
/// ```
/// use notakto::search::solve;
///
/// let (value, visited) = solve(&[], 1).unwrap();
/// assert_eq!(value, 1); // first player wins on a single board
/// assert_eq!(visited[0], Vec::<usize>::new());
/// ```
pub fn solve(history: &[usize], num_boards: usize) -> Result<(Value, Vec<Vec<usize>>), crate::Error> {
    solve_with(history, &SearchConfig::new(num_boards))
}

/// Like [`solve`], with an explicit configuration.
///
/// # Errors
///
/// Returns error for an invalid configuration or history, or
/// [`crate::Error::SearchAborted`] if a budget stops the search.
pub fn solve_with(
    history: &[usize],
    config: &SearchConfig,
) -> Result<(Value, Vec<Vec<usize>>), crate::Error> {
    let node = HistoryNode::new(config.num_boards, history)?;
    let mut engine = AlphaBetaSearch::new(config.clone())?;
    let mut ctx = SearchContext::new(config.record_histories);

    match engine.run(&node, &mut ctx)? {
        SearchOutcome::Solved(value) => Ok((value, ctx.visits.into_histories())),
        SearchOutcome::Aborted(reason) => Err(crate::Error::SearchAborted {
            visited: ctx.visits.count(),
            reason: format!("{reason:?}"),
        }),
    }
}
