//! Subcommands of the `notakto` binary

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    app::SearchConfig,
    game::{HistoryNode, MoveOrdering},
    search::CachePolicy,
};

pub mod analyze;
pub mod solve;

/// Position and search options shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct SearchArgs {
    /// Number of boards
    pub boards: usize,

    /// Actions played so far, e.g. "4,13,0" (empty for the start position)
    #[arg(default_value = "")]
    pub history: String,

    /// JSON search configuration; command-line flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Move ordering used by the search
    #[arg(long, value_enum)]
    pub ordering: Option<MoveOrdering>,

    /// Which results may enter the transposition table
    #[arg(long, value_enum)]
    pub cache_policy: Option<CachePolicy>,

    /// Abort after expanding this many positions
    #[arg(long)]
    pub node_budget: Option<u64>,

    /// Abort after this many milliseconds
    #[arg(long)]
    pub time_limit_ms: Option<u64>,

    /// Show a progress spinner while searching
    #[arg(long)]
    pub progress: bool,
}

impl SearchArgs {
    /// Merge file configuration and flags into a validated config
    pub fn to_config(&self, record_histories: bool) -> Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => SearchConfig::from_json_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SearchConfig::new(self.boards),
        };

        config.num_boards = self.boards;
        config.record_histories = record_histories;
        if let Some(ordering) = self.ordering {
            config.ordering = ordering;
        }
        if let Some(policy) = self.cache_policy {
            config.cache_policy = policy;
        }
        if self.node_budget.is_some() {
            config.node_budget = self.node_budget;
        }
        if self.time_limit_ms.is_some() {
            config.time_limit_ms = self.time_limit_ms;
        }

        config.validate()?;
        Ok(config)
    }

    /// Replay the history into a node
    pub fn to_node(&self) -> Result<HistoryNode> {
        let actions = HistoryNode::parse_actions(&self.history)?;
        let node = HistoryNode::new(self.boards, &actions)
            .with_context(|| format!("replaying history '{}'", self.history))?;
        Ok(node)
    }
}
