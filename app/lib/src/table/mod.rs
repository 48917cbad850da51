//! Hash table implementations and the interface they share.
//!
//! Two concrete tables implement [`HashTable`]:
//!
//! - [`ChainingTable`]: each bucket holds an ordered list of entries, so
//!   colliding keys simply share a bucket.
//! - [`LinearProbingTable`]: a flat slot array where a colliding key moves
//!   forward to the next free slot.
//!
//! [`StrategyTable`] wraps either one behind a single type when the strategy
//! is only known at runtime.

mod chaining;
mod linear;
mod strategy;

pub use chaining::ChainingTable;
pub use linear::LinearProbingTable;
pub use strategy::StrategyTable;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::key::{Key, KeyRef};

/// Collision-resolution strategy of a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Separate chaining: per-bucket entry lists.
    Chaining,
    /// Open addressing with linear probing.
    LinearProbing,
}

impl Strategy {
    /// All strategies, in report order.
    pub const ALL: [Strategy; 2] = [Strategy::Chaining, Strategy::LinearProbing];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Chaining => "Chaining",
            Strategy::LinearProbing => "Linear Probing",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A stored key-value pair.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Entry<V> {
    pub(crate) key: Key,
    pub(crate) value: V,
}

impl<V> Entry<V> {
    pub(crate) fn new(key: Key, value: V) -> Self {
        Self { key, value }
    }
}

/// Point-in-time statistics of a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableStats {
    /// Strategy of the table.
    pub strategy: Strategy,
    /// Number of stored entries.
    pub len: usize,
    /// Number of buckets or slots.
    pub capacity: usize,
    /// `len / capacity`.
    pub load_factor: f64,
    /// Number of rehashes performed since construction.
    pub resizes: usize,
    /// Largest number of cells a successful lookup has to visit: the
    /// longest chain for chaining, the longest home-to-slot distance
    /// (plus one) for linear probing.
    pub max_probe_length: usize,
}

/// Operations shared by both table strategies.
///
/// Lookups never fail: an absent key is `None` from [`get`](Self::get) and
/// [`retrieve`](Self::retrieve), and `false` from [`remove`](Self::remove).
/// `insert` only fails for a fixed-capacity linear-probing table that has no
/// free slot left, and in that case the table is unchanged.
///
/// # Example
///
/// ```
/// use htable::{ChainingTable, HashTable, LinearProbingTable};
///
/// fn exercise<T: HashTable<i32>>(table: &mut T) {
///     table.insert("age", 30).unwrap();
///     table.insert("age", 31).unwrap();
///     assert_eq!(table.retrieve("age"), Some(31));
///     assert!(table.remove("age"));
///     assert!(!table.remove("age"));
///     assert_eq!(table.retrieve("age"), None);
/// }
///
/// exercise(&mut ChainingTable::new(10));
/// exercise(&mut LinearProbingTable::new(10));
/// ```
pub trait HashTable<V> {
    /// Insert a key-value pair, overwriting the value if the key exists.
    fn insert<K: Into<Key>>(&mut self, key: K, value: V) -> Result<()>;

    /// Borrow the value stored under `key`.
    fn get<'k>(&self, key: impl Into<KeyRef<'k>>) -> Option<&V>;

    /// Remove `key`, returning true if it was present.
    fn remove<'k>(&mut self, key: impl Into<KeyRef<'k>>) -> bool;

    /// Number of stored entries.
    fn len(&self) -> usize;

    /// Number of buckets or slots.
    fn capacity(&self) -> usize;

    /// Rehash every entry into `new_capacity` cells.
    ///
    /// Fails with `InvalidCapacity` if `new_capacity` is 0, or if it is too
    /// small to hold the current entries of a linear-probing table.
    fn resize(&mut self, new_capacity: usize) -> Result<()>;

    /// Remove every entry, keeping the current capacity.
    fn clear(&mut self);

    /// Iterate over all entries in storage order.
    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a Key, &'a V)> + 'a
    where
        V: 'a;

    /// Snapshot of the table's statistics.
    fn stats(&self) -> TableStats;

    /// The collision-resolution strategy of this table.
    fn strategy(&self) -> Strategy;

    /// Get a copy of the value stored under `key`.
    fn retrieve<'k>(&self, key: impl Into<KeyRef<'k>>) -> Option<V>
    where
        V: Clone,
    {
        self.get(key).cloned()
    }

    /// Check if the table contains `key`.
    fn contains_key<'k>(&self, key: impl Into<KeyRef<'k>>) -> bool {
        self.get(key).is_some()
    }

    /// Returns true if the table holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `len / capacity`.
    fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }
}
