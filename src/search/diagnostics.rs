//! Search instrumentation: visited histories and counters

use serde::{Deserialize, Serialize};

/// Ordered log of every history the search expanded
///
/// One entry is appended per call that misses the transposition table.
/// When history recording is off only the count is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VisitLog {
    histories: Vec<Vec<usize>>,
    count: u64,
    record_histories: bool,
}

impl VisitLog {
    pub fn new(record_histories: bool) -> Self {
        VisitLog {
            histories: Vec::new(),
            count: 0,
            record_histories,
        }
    }

    pub fn record(&mut self, history: &[usize]) {
        self.count += 1;
        if self.record_histories {
            self.histories.push(history.to_vec());
        }
    }

    /// Number of visits, whether or not histories were kept
    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn histories(&self) -> &[Vec<usize>] {
        &self.histories
    }

    pub fn into_histories(self) -> Vec<Vec<usize>> {
        self.histories
    }

    pub fn clear(&mut self) {
        self.histories.clear();
        self.count = 0;
    }
}

/// Counters collected during a search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub cache_hits: u64,
    pub terminal_nodes: u64,
    pub stores: u64,
    /// Results withheld from the table by the cache policy
    pub skipped_stores: u64,
    pub cutoffs: u64,
    pub max_depth: usize,
}
