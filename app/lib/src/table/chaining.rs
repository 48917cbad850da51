//! Separate-chaining hash table.
//!
//! Every bucket is an ordered `Vec` of entries. A key lives in bucket
//! `hash(key) % capacity`, at most once. New keys are appended to the end of
//! their bucket and removal keeps the order of the remaining entries.

use log::debug;

use super::{Entry, HashTable, Strategy, TableStats};
use crate::config::{ChainingConfig, ResizePolicy};
use crate::error::{Result, TableError};
use crate::hash::index_for;
use crate::key::{Key, KeyRef};

/// Hash table resolving collisions with per-bucket entry lists.
///
/// # Example
///
/// ```
/// use htable::{ChainingTable, HashTable};
///
/// let mut table = ChainingTable::new(10);
/// table.insert("name", "John").unwrap();
/// table.insert("city", "New York").unwrap();
/// table.insert("name", "Jane").unwrap();
///
/// assert_eq!(table.retrieve("name"), Some("Jane"));
/// assert_eq!(table.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ChainingTable<V> {
    buckets: Vec<Vec<Entry<V>>>,
    len: usize,
    resize: ResizePolicy,
    resizes: usize,
}

impl<V> ChainingTable<V> {
    /// Create a table with `capacity` buckets and the default resize policy.
    ///
    /// A capacity of 0 is treated as 1.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(ChainingConfig::default().with_initial_capacity(capacity.max(1)))
    }

    /// Create a table from a configuration.
    pub fn with_config(config: ChainingConfig) -> Self {
        Self {
            buckets: empty_buckets(config.initial_capacity.max(1)),
            len: 0,
            resize: config.resize,
            resizes: 0,
        }
    }

    /// The resize policy this table was built with.
    pub fn resize_policy(&self) -> ResizePolicy {
        self.resize
    }

    /// Number of entries in the longest chain.
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Verify that every entry sits in its home bucket and that no key is
    /// stored twice.
    pub fn is_consistent(&self) -> bool {
        let capacity = self.buckets.len();
        let mut seen = 0;
        for (index, bucket) in self.buckets.iter().enumerate() {
            for (position, entry) in bucket.iter().enumerate() {
                if index_for(&entry.key, capacity) != index {
                    return false;
                }
                if bucket[position + 1..].iter().any(|e| e.key == entry.key) {
                    return false;
                }
                seen += 1;
            }
        }
        seen == self.len
    }

    fn bucket_index(&self, key: KeyRef<'_>) -> usize {
        index_for(key, self.buckets.len())
    }

    /// Move every entry into a fresh bucket array of `new_capacity`.
    fn rehash(&mut self, new_capacity: usize) {
        let old_capacity = self.buckets.len();
        let old = std::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        for entry in old.into_iter().flatten() {
            let index = index_for(&entry.key, new_capacity);
            self.buckets[index].push(entry);
        }
        self.resizes += 1;

        debug!(
            "Chaining table resized from {} to {} buckets ({} entries)",
            old_capacity, new_capacity, self.len
        );
    }
}

impl<V> Default for ChainingTable<V> {
    fn default() -> Self {
        Self::with_config(ChainingConfig::default())
    }
}

impl<V> HashTable<V> for ChainingTable<V> {
    fn insert<K: Into<Key>>(&mut self, key: K, value: V) -> Result<()> {
        let key = key.into();
        let index = self.bucket_index(key.as_key_ref());

        if let Some(entry) = self.buckets[index].iter_mut().find(|e| e.key == key) {
            entry.value = value;
            return Ok(());
        }

        let capacity = self.buckets.len();
        let index = if self.resize.should_grow(self.len, capacity) {
            self.rehash(capacity * 2);
            self.bucket_index(key.as_key_ref())
        } else {
            index
        };

        self.buckets[index].push(Entry::new(key, value));
        self.len += 1;
        Ok(())
    }

    fn get<'k>(&self, key: impl Into<KeyRef<'k>>) -> Option<&V> {
        let key = key.into();
        self.buckets[self.bucket_index(key)]
            .iter()
            .find(|e| e.key.matches(key))
            .map(|e| &e.value)
    }

    fn remove<'k>(&mut self, key: impl Into<KeyRef<'k>>) -> bool {
        let key = key.into();
        let index = self.bucket_index(key);
        let bucket = &mut self.buckets[index];

        match bucket.iter().position(|e| e.key.matches(key)) {
            Some(position) => {
                bucket.remove(position);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    fn len(&self) -> usize {
        self.len
    }

    fn capacity(&self) -> usize {
        self.buckets.len()
    }

    fn resize(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity == 0 {
            return Err(TableError::InvalidCapacity {
                requested: new_capacity,
                len: self.len,
            });
        }
        self.rehash(new_capacity);
        Ok(())
    }

    fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Vec::clear);
        self.len = 0;
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a Key, &'a V)> + 'a
    where
        V: 'a,
    {
        self.buckets
            .iter()
            .flatten()
            .map(|entry| (&entry.key, &entry.value))
    }

    fn stats(&self) -> TableStats {
        TableStats {
            strategy: Strategy::Chaining,
            len: self.len,
            capacity: self.buckets.len(),
            load_factor: self.load_factor(),
            resizes: self.resizes,
            max_probe_length: self.longest_chain(),
        }
    }

    fn strategy(&self) -> Strategy {
        Strategy::Chaining
    }
}

fn empty_buckets<V>(capacity: usize) -> Vec<Vec<Entry<V>>> {
    std::iter::repeat_with(Vec::new).take(capacity).collect()
}
