//! Transposition table keyed by board configuration

use std::collections::HashMap;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{
    game::BoardKey,
    types::{PLAYER_ONE_WINS, PLAYER_TWO_WINS, Value},
};

/// Which search results are allowed into the table
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum CachePolicy {
    /// Store only values proven exact for the position
    #[default]
    ExactOnly,
    /// Store every result, including fail-high and fail-low bounds
    ///
    /// A bound stored this way may be served to a later call with a wider
    /// window and change the root value. Kept to reproduce the classic
    /// course-assignment solver's output.
    Unconditional,
}

impl CachePolicy {
    /// Whether a result computed inside the window `(alpha, beta)` may be stored.
    ///
    /// A fail-low result is only an upper bound and a fail-high result only a
    /// lower bound. With values restricted to ±1, such a bound is still exact
    /// when it sits on the matching end of the value range.
    pub fn admits(self, value: Value, alpha: Value, beta: Value) -> bool {
        match self {
            CachePolicy::Unconditional => true,
            CachePolicy::ExactOnly => {
                if value <= alpha {
                    value == PLAYER_TWO_WINS
                } else if value >= beta {
                    value == PLAYER_ONE_WINS
                } else {
                    true
                }
            }
        }
    }
}

/// Cache from canonical board key to game value
///
/// Entries are write-once: a key, once stored, keeps its value for the
/// lifetime of the table. There is no eviction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranspositionTable {
    entries: HashMap<BoardKey, Value>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, key: &BoardKey) -> Option<Value> {
        self.entries.get(key).copied()
    }

    /// Store a value for `key`.
    ///
    /// Storing the value already present is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::CacheConflict`] if a different value is already
    /// stored; the table is left unchanged.
    pub fn store(&mut self, key: BoardKey, value: Value) -> Result<(), crate::Error> {
        if let Some(&stored) = self.entries.get(&key) {
            if stored != value {
                return Err(crate::Error::CacheConflict {
                    key: key.into_inner(),
                    stored,
                    attempted: value,
                });
            }
            return Ok(());
        }
        self.entries.insert(key, value);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BoardState;

    fn key(s: &str) -> BoardKey {
        BoardState::from_key(s).unwrap().canonical_key()
    }

    #[test]
    fn test_lookup_miss_then_hit() {
        let mut table = TranspositionTable::new();
        let k = key("x00000000");
        assert_eq!(table.lookup(&k), None);

        table.store(k.clone(), 1).unwrap();
        assert_eq!(table.lookup(&k), Some(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_store_same_value_is_idempotent() {
        let mut table = TranspositionTable::new();
        let k = key("0000x0000");
        table.store(k.clone(), -1).unwrap();
        table.store(k.clone(), -1).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.lookup(&k), Some(-1));
    }

    #[test]
    fn test_store_conflict_is_rejected() {
        let mut table = TranspositionTable::new();
        let k = key("0000x0000");
        table.store(k.clone(), -1).unwrap();
        let err = table.store(k.clone(), 1).unwrap_err();
        assert!(matches!(
            err,
            crate::Error::CacheConflict {
                stored: -1,
                attempted: 1,
                ..
            }
        ));
        assert_eq!(table.lookup(&k), Some(-1));
    }

    #[test]
    fn test_exact_only_admits_interior_values() {
        let policy = CachePolicy::ExactOnly;
        assert!(policy.admits(1, Value::MIN, Value::MAX));
        assert!(policy.admits(-1, Value::MIN, Value::MAX));
        assert!(policy.admits(1, -1, Value::MAX));
    }

    #[test]
    fn test_exact_only_admits_bounds_at_range_ends() {
        let policy = CachePolicy::ExactOnly;
        // fail-low at -1 can only be -1
        assert!(policy.admits(-1, -1, Value::MAX));
        // fail-high at +1 can only be +1
        assert!(policy.admits(1, Value::MIN, 1));
    }

    #[test]
    fn test_exact_only_rejects_loose_bounds() {
        let policy = CachePolicy::ExactOnly;
        // fail-low +1 says nothing about the true value
        assert!(!policy.admits(1, 1, Value::MAX));
        // fail-high -1 says nothing either
        assert!(!policy.admits(-1, Value::MIN, -1));
        assert!(CachePolicy::Unconditional.admits(1, 1, Value::MAX));
    }
}
