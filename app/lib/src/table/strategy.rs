//! A table whose strategy is chosen at construction time.
//!
//! `StrategyTable` is an enum over the two concrete tables. Every
//! [`HashTable`] call is forwarded to the selected variant, so callers that
//! pick a strategy from configuration or the command line can hold a single
//! type without boxing.

use super::{ChainingTable, HashTable, LinearProbingTable, Strategy, TableStats};
use crate::config::TableConfig;
use crate::error::Result;
use crate::key::{Key, KeyRef};

/// Either a [`ChainingTable`] or a [`LinearProbingTable`].
///
/// # Example
///
/// ```
/// use htable::{HashTable, Strategy, StrategyTable};
///
/// for strategy in Strategy::ALL {
///     let mut table = StrategyTable::new(strategy, 10);
///     table.insert("a", 1).unwrap();
///     table.insert("b", 2).unwrap();
///     assert!(table.remove("a"));
///     assert_eq!(table.retrieve("a"), None);
///     assert_eq!(table.retrieve("b"), Some(2));
///     assert_eq!(table.strategy(), strategy);
/// }
/// ```
#[derive(Debug, Clone)]
pub enum StrategyTable<V> {
    /// Separate chaining variant.
    Chaining(ChainingTable<V>),
    /// Linear probing variant.
    LinearProbing(LinearProbingTable<V>),
}

impl<V> StrategyTable<V> {
    /// Create a table of the given strategy with `capacity` cells and the
    /// strategy's default resize policy.
    pub fn new(strategy: Strategy, capacity: usize) -> Self {
        match strategy {
            Strategy::Chaining => Self::Chaining(ChainingTable::new(capacity)),
            Strategy::LinearProbing => Self::LinearProbing(LinearProbingTable::new(capacity)),
        }
    }

    /// Create a table of the given strategy using the matching section of
    /// `config`.
    pub fn with_config(strategy: Strategy, config: &TableConfig) -> Self {
        match strategy {
            Strategy::Chaining => {
                Self::Chaining(ChainingTable::with_config(config.chaining.clone()))
            }
            Strategy::LinearProbing => {
                Self::LinearProbing(LinearProbingTable::with_config(config.probing.clone()))
            }
        }
    }

    /// Check if this is the chaining variant.
    pub fn is_chaining(&self) -> bool {
        matches!(self, Self::Chaining(_))
    }

    /// Check if this is the linear probing variant.
    pub fn is_linear_probing(&self) -> bool {
        matches!(self, Self::LinearProbing(_))
    }

    /// Verify the invariants of the underlying table.
    pub fn is_consistent(&self) -> bool {
        match self {
            Self::Chaining(table) => table.is_consistent(),
            Self::LinearProbing(table) => table.is_consistent(),
        }
    }
}

impl<V> From<ChainingTable<V>> for StrategyTable<V> {
    fn from(table: ChainingTable<V>) -> Self {
        Self::Chaining(table)
    }
}

impl<V> From<LinearProbingTable<V>> for StrategyTable<V> {
    fn from(table: LinearProbingTable<V>) -> Self {
        Self::LinearProbing(table)
    }
}

impl<V> HashTable<V> for StrategyTable<V> {
    fn insert<K: Into<Key>>(&mut self, key: K, value: V) -> Result<()> {
        match self {
            Self::Chaining(table) => table.insert(key, value),
            Self::LinearProbing(table) => table.insert(key, value),
        }
    }

    fn get<'k>(&self, key: impl Into<KeyRef<'k>>) -> Option<&V> {
        match self {
            Self::Chaining(table) => table.get(key),
            Self::LinearProbing(table) => table.get(key),
        }
    }

    fn remove<'k>(&mut self, key: impl Into<KeyRef<'k>>) -> bool {
        match self {
            Self::Chaining(table) => table.remove(key),
            Self::LinearProbing(table) => table.remove(key),
        }
    }

    fn len(&self) -> usize {
        match self {
            Self::Chaining(table) => table.len(),
            Self::LinearProbing(table) => table.len(),
        }
    }

    fn capacity(&self) -> usize {
        match self {
            Self::Chaining(table) => table.capacity(),
            Self::LinearProbing(table) => table.capacity(),
        }
    }

    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        match self {
            Self::Chaining(table) => table.resize(new_capacity),
            Self::LinearProbing(table) => table.resize(new_capacity),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Chaining(table) => table.clear(),
            Self::LinearProbing(table) => table.clear(),
        }
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a Key, &'a V)> + 'a
    where
        V: 'a,
    {
        let iter: Box<dyn Iterator<Item = (&'a Key, &'a V)> + 'a> = match self {
            Self::Chaining(table) => Box::new(table.iter()),
            Self::LinearProbing(table) => Box::new(table.iter()),
        };
        iter
    }

    fn stats(&self) -> TableStats {
        match self {
            Self::Chaining(table) => table.stats(),
            Self::LinearProbing(table) => table.stats(),
        }
    }

    fn strategy(&self) -> Strategy {
        match self {
            Self::Chaining(_) => Strategy::Chaining,
            Self::LinearProbing(_) => Strategy::LinearProbing,
        }
    }
}
