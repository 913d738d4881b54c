//! Search configuration.

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{game::MoveOrdering, search::CachePolicy};

/// Configuration for a solver run.
///
/// Builder-style API; every field has a default except the board count.
///
/// # Examples
///
/// ```
/// use notakto::app::SearchConfig;
/// use notakto::game::MoveOrdering;
/// use notakto::search::CachePolicy;
///
/// let config = SearchConfig::new(2)
///     .with_ordering(MoveOrdering::BoardOrder)
///     .with_cache_policy(CachePolicy::ExactOnly)
///     .with_node_budget(1_000_000)
///     .with_record_histories(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of boards in play
    pub num_boards: usize,
    /// Order in which candidate actions are expanded
    pub ordering: MoveOrdering,
    /// Which results may enter the transposition table
    pub cache_policy: CachePolicy,
    /// Abort after this many expanded positions
    pub node_budget: Option<u64>,
    /// Abort after this much wall-clock time, in milliseconds
    pub time_limit_ms: Option<u64>,
    /// Keep every visited history, not just the count
    pub record_histories: bool,
}

impl SearchConfig {
    /// Create a configuration for `num_boards` boards.
    ///
    /// Defaults:
    /// - Ordering: `MoveOrdering::Parity`
    /// - Cache policy: `CachePolicy::ExactOnly`
    /// - No node budget or time limit
    /// - Visited histories recorded
    pub fn new(num_boards: usize) -> Self {
        Self {
            num_boards,
            ordering: MoveOrdering::default(),
            cache_policy: CachePolicy::default(),
            node_budget: None,
            time_limit_ms: None,
            record_histories: true,
        }
    }

    pub fn with_ordering(mut self, ordering: MoveOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_cache_policy(mut self, policy: CachePolicy) -> Self {
        self.cache_policy = policy;
        self
    }

    pub fn with_node_budget(mut self, nodes: u64) -> Self {
        self.node_budget = Some(nodes);
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit_ms = Some(u64::try_from(limit.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_record_histories(mut self, record: bool) -> Self {
        self.record_histories = record;
        self
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Check the configuration before a search starts.
    ///
    /// # Errors
    ///
    /// Returns error for a zero board count or a zero node budget.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.num_boards == 0 {
            return Err(crate::Error::InvalidBoardCount {
                count: self.num_boards,
            });
        }
        if self.node_budget == Some(0) {
            return Err(crate::Error::InvalidConfiguration {
                message: "node budget must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Load a configuration from a JSON file; missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsed or validated.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, crate::Error> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| crate::Error::Io {
            operation: format!("read config {}", path.display()),
            source,
        })?;
        let config: SearchConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or written.
    pub fn to_json_file(&self, path: impl AsRef<Path>) -> Result<(), crate::Error> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| crate::Error::Io {
            operation: format!("create config {}", path.display()),
            source,
        })?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(1)
    }
}
